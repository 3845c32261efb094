//! Per-operation frame scheduling.

use tracing::trace;

use crate::budget::RenderBudget;
use crate::cancel::StopHandle;
use crate::error::SortResult;

/// What the caller must do after an instrumented operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// Keep going; the batch is not complete yet.
    Continue,
    /// The batch is complete: redraw everything first if `full_redraw`,
    /// then present the frame and call [`RenderScheduler::pause`].
    Present {
        /// Whether the whole sequence must be redrawn before presenting.
        full_redraw: bool,
    },
}

/// Counts instrumented operations and decides when to present and pause.
///
/// The scheduler does not draw: it tells the caller whether partial redraws
/// are wanted ([`draws_partial`](Self::draws_partial)) and, after each
/// operation, whether a frame boundary was reached ([`step`](Self::step)).
/// The pause itself goes through the [`StopHandle`], so a stop request cuts
/// it short.
///
/// # Examples
///
/// ```
/// use sortvis_array::{FrameAction, RenderBudget, RenderScheduler, StopHandle};
///
/// let mut scheduler = RenderScheduler::new(RenderBudget::new(100.0, 4), StopHandle::new());
/// assert_eq!(scheduler.step(), FrameAction::Continue);
/// assert_eq!(scheduler.step(), FrameAction::Present { full_redraw: false });
/// ```
#[derive(Debug)]
pub struct RenderScheduler {
    budget: RenderBudget,
    steps_since_frame: u64,
    frames: u64,
    stop: StopHandle,
}

impl RenderScheduler {
    /// Creates a scheduler for `budget` whose pauses observe `stop`.
    pub fn new(budget: RenderBudget, stop: StopHandle) -> Self {
        Self {
            budget,
            steps_since_frame: 0,
            frames: 0,
            stop,
        }
    }

    /// Returns the pacing parameters.
    #[inline]
    pub fn budget(&self) -> &RenderBudget {
        &self.budget
    }

    /// Whether changed elements should be redrawn immediately.
    ///
    /// False in lazy mode, where the full redraw at each frame boundary
    /// covers them.
    #[inline]
    pub fn draws_partial(&self) -> bool {
        !self.budget.is_lazy()
    }

    /// Operations counted toward the current frame.
    #[inline]
    pub fn steps_since_frame(&self) -> u64 {
        self.steps_since_frame
    }

    /// Frames completed so far, including their pause.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Counts one instrumented operation.
    pub fn step(&mut self) -> FrameAction {
        self.steps_since_frame += 1;
        if self.steps_since_frame >= self.budget.steps_per_batch() {
            FrameAction::Present {
                full_redraw: self.budget.is_lazy(),
            }
        } else {
            FrameAction::Continue
        }
    }

    /// Pauses for the frame delay and starts the next batch.
    ///
    /// Returns [`Cancelled`](crate::Cancelled) if a stop is requested before
    /// or during the pause; the batch is then left unfinished.
    pub fn pause(&mut self) -> SortResult<()> {
        self.stop.sleep(self.budget.delay())?;
        self.steps_since_frame = 0;
        self.frames += 1;
        trace!(frame = self.frames, "frame presented");
        Ok(())
    }
}
