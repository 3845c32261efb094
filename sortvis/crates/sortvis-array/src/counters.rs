//! Operation counters readable from any thread.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Comparison and swap counts for one instrumented array.
///
/// Only the worker increments; other threads may read a snapshot at any
/// time. Counts never decrease.
#[derive(Debug, Default)]
pub struct OperationCounters {
    comparisons: AtomicU64,
    swaps: AtomicU64,
}

impl OperationCounters {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed comparisons.
    #[inline]
    pub fn comparisons(&self) -> u64 {
        self.comparisons.load(Ordering::Relaxed)
    }

    /// Number of completed swaps.
    #[inline]
    pub fn swaps(&self) -> u64 {
        self.swaps.load(Ordering::Relaxed)
    }

    /// Returns both counts.
    pub fn snapshot(&self) -> OpStats {
        OpStats {
            comparisons: self.comparisons(),
            swaps: self.swaps(),
        }
    }

    #[inline]
    pub(crate) fn record_comparison(&self) {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_swap(&self) {
        self.swaps.fetch_add(1, Ordering::Relaxed);
    }
}

/// A point-in-time copy of [`OperationCounters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct OpStats {
    /// Number of completed comparisons.
    pub comparisons: u64,
    /// Number of completed swaps.
    pub swaps: u64,
}

impl std::fmt::Display for OpStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} comparisons, {} swaps",
            self.comparisons, self.swaps
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_counters_start_at_zero() {
        let counters = OperationCounters::new();
        assert_eq!(counters.snapshot(), OpStats::default());
    }

    #[test]
    fn test_record_increments_by_one() {
        let counters = OperationCounters::new();
        counters.record_comparison();
        counters.record_comparison();
        counters.record_swap();
        assert_eq!(
            counters.snapshot(),
            OpStats {
                comparisons: 2,
                swaps: 1
            }
        );
    }

    #[test]
    fn test_snapshot_from_other_thread() {
        let counters = Arc::new(OperationCounters::new());
        let writer = Arc::clone(&counters);
        thread::spawn(move || {
            for _ in 0..1000 {
                writer.record_swap();
            }
        })
        .join()
        .unwrap();
        assert_eq!(counters.swaps(), 1000);
    }

    #[test]
    fn test_stats_display_and_serialize() {
        let stats = OpStats {
            comparisons: 10,
            swaps: 3,
        };
        assert_eq!(stats.to_string(), "10 comparisons, 3 swaps");
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            r#"{"comparisons":10,"swaps":3}"#
        );
    }
}
