//! Pacing parameters derived from the playback speed.

use std::time::Duration;

use serde::Serialize;

/// Shortest pause between frames.
pub const MIN_DELAY_MS: u64 = 20;

/// Speed units per instrumented operation in one frame.
const SPEED_PER_STEP: f64 = 50.0;

/// How often the worker pauses and how much work it does per frame.
///
/// Derived once from the speed and the sequence length:
///
/// - `delay_ms = max(round(1000 / speed), 20)`
/// - `steps_per_batch = max(round(speed / 50), 1)`
/// - `lazy = steps_per_batch > size`
///
/// In lazy mode a single frame already covers more operations than there
/// are elements, so per-operation partial redraws are skipped and the whole
/// sequence is redrawn once per frame instead.
///
/// # Examples
///
/// ```
/// use sortvis_array::RenderBudget;
///
/// let budget = RenderBudget::new(100.0, 4);
/// assert_eq!(budget.delay_ms(), 20);
/// assert_eq!(budget.steps_per_batch(), 2);
/// assert!(!budget.is_lazy());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RenderBudget {
    delay_ms: u64,
    steps_per_batch: u64,
    lazy: bool,
}

impl RenderBudget {
    /// Derives the budget for `speed` and a sequence of `size` elements.
    ///
    /// `speed` should be finite and positive; out-of-range values saturate
    /// to the floors above.
    pub fn new(speed: f64, size: usize) -> Self {
        // `as` saturates: NaN becomes 0 and huge values become u64::MAX.
        let delay_ms = ((1000.0 / speed).round() as u64).max(MIN_DELAY_MS);
        let steps_per_batch = ((speed / SPEED_PER_STEP).round() as u64).max(1);
        let lazy = steps_per_batch > size as u64;
        Self {
            delay_ms,
            steps_per_batch,
            lazy,
        }
    }

    /// Pause after each presented frame, in milliseconds.
    #[inline]
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Pause after each presented frame.
    #[inline]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Instrumented operations allowed per frame.
    #[inline]
    pub const fn steps_per_batch(&self) -> u64 {
        self.steps_per_batch
    }

    /// Whether partial redraws are replaced by one full redraw per frame.
    #[inline]
    pub const fn is_lazy(&self) -> bool {
        self.lazy
    }
}
