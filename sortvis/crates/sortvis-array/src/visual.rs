//! The instrumented, throttled array.

use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;

use rand::Rng;
use sortvis_canvas::{SharedCanvas, Surface};
use tracing::{debug, info, warn};

use crate::budget::RenderBudget;
use crate::cancel::StopHandle;
use crate::config::VisualizerConfig;
use crate::counters::{OpStats, OperationCounters};
use crate::error::{ConfigError, IntegrityViolation, RunError, SortResult};
use crate::painter::BarPainter;
use crate::scheduler::{FrameAction, RenderScheduler};
use crate::sequence::{SortArray, Sequence};
use crate::state::VisualState;

/// A shuffled permutation that counts, colors, draws and paces every
/// comparison and swap made on it.
///
/// Element `i` is drawn as a bar in row `i` whose length encodes its value
/// and whose color encodes its [`VisualState`]. After every instrumented
/// operation the array may present a frame and pause so the run plays back
/// at the configured speed; see [`RenderBudget`].
///
/// Once a stop is requested through [`request_stop`](Self::request_stop) or
/// a [`StopHandle`], every further `compare` and `swap` returns
/// [`Cancelled`](crate::Cancelled) without touching the sequence or the
/// counters, and a pause in progress ends early.
///
/// # Examples
///
/// ```
/// use sortvis_array::{SortArray, SortResult, VisualSortArray, VisualizerConfig};
///
/// fn insertion_sort<A: SortArray>(arr: &mut A) -> SortResult<()> {
///     for i in 1..arr.len() {
///         let mut j = i;
///         while j > 0 && arr.compare(j - 1, j)?.is_gt() {
///             arr.swap(j - 1, j)?;
///             j -= 1;
///         }
///     }
///     Ok(())
/// }
///
/// let config = VisualizerConfig::new(8, 1, 5000.0);
/// let mut arr = VisualSortArray::new(config).unwrap();
/// let stats = arr.run(|arr| insertion_sort(arr)).unwrap();
/// assert!(stats.comparisons >= 7);
/// ```
pub struct VisualSortArray<S: Surface = SharedCanvas> {
    config: VisualizerConfig,
    sequence: Sequence,
    states: Vec<VisualState>,
    painter: BarPainter,
    scheduler: RenderScheduler,
    stop: StopHandle,
    stop_observed: bool,
    counters: Arc<OperationCounters>,
    surface: S,
}

impl VisualSortArray<SharedCanvas> {
    /// Creates an array drawing into a new [`SharedCanvas`] of side
    /// `size * scale`, filled with the palette background.
    pub fn new(config: VisualizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let side = config.canvas_side()?;
        let canvas = SharedCanvas::new(side, side, config.palette.background);
        Self::with_surface(config, canvas)
    }
}

impl<S: Surface> VisualSortArray<S> {
    /// Creates an array drawing into `surface`, shuffled with the thread RNG.
    pub fn with_surface(config: VisualizerConfig, surface: S) -> Result<Self, ConfigError> {
        Self::with_surface_and_rng(config, surface, &mut rand::rng())
    }

    /// Creates an array drawing into `surface`, shuffled with `rng`.
    ///
    /// The initial permutation is drawn and presented before returning.
    pub fn with_surface_and_rng<R: Rng + ?Sized>(
        config: VisualizerConfig,
        surface: S,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let scale = config.scale;
        let budget = RenderBudget::new(config.speed, config.size);
        let stop = StopHandle::new();

        let mut arr = Self {
            sequence: Sequence::shuffled(config.size, rng),
            states: vec![VisualState::Active; config.size],
            painter: BarPainter::new(scale, config.palette),
            scheduler: RenderScheduler::new(budget, stop.clone()),
            stop,
            stop_observed: false,
            counters: Arc::new(OperationCounters::new()),
            surface,
            config,
        };
        arr.draw_all();
        arr.surface.present();

        debug!(
            size = arr.config.size,
            scale,
            speed = arr.config.speed,
            delay_ms = budget.delay_ms(),
            steps_per_batch = budget.steps_per_batch(),
            lazy = budget.is_lazy(),
            "visual sort array created"
        );
        Ok(arr)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always false for a validated configuration.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Compares the elements at `i` and `j`.
    ///
    /// Counts the comparison, shows both elements as
    /// [`Comparing`](VisualState::Comparing) for the frame, then returns them
    /// to [`Active`](VisualState::Active).
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    pub fn compare(&mut self, i: usize, j: usize) -> SortResult<Ordering> {
        self.ensure_running()?;
        self.check_bounds(i, j);
        self.counters.record_comparison();

        self.set_state(i, VisualState::Comparing);
        self.set_state(j, VisualState::Comparing);
        self.advance()?;
        self.set_state(i, VisualState::Active);
        self.set_state(j, VisualState::Active);

        Ok(self.sequence.compare(i, j))
    }

    /// Exchanges the elements at `i` and `j`. `i == j` counts as a swap.
    ///
    /// Both elements are marked [`Active`](VisualState::Active) after the
    /// exchange.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    pub fn swap(&mut self, i: usize, j: usize) -> SortResult<()> {
        self.ensure_running()?;
        self.check_bounds(i, j);
        self.sequence.swap(i, j);
        self.counters.record_swap();

        self.set_state(i, VisualState::Active);
        self.set_state(j, VisualState::Active);
        self.advance()
    }

    /// Sets the state of one element and redraws its row.
    ///
    /// Does not count toward the frame budget and never pauses.
    pub fn set_state(&mut self, index: usize, state: VisualState) {
        self.states[index] = state;
        self.redraw(index..index + 1);
    }

    /// Sets the state of every element in `range` and redraws those rows.
    pub fn set_state_range(&mut self, range: Range<usize>, state: VisualState) {
        self.states[range.clone()].fill(state);
        self.redraw(range);
    }

    /// Marks one element as part of the working set.
    pub fn set_active(&mut self, index: usize) {
        self.set_state(index, VisualState::Active);
    }

    /// Marks one element as outside the working set.
    pub fn set_inactive(&mut self, index: usize) {
        self.set_state(index, VisualState::Inactive);
    }

    /// Marks one element as in its final position.
    pub fn set_done(&mut self, index: usize) {
        self.set_state(index, VisualState::Done);
    }

    /// Marks `range` as part of the working set.
    pub fn set_active_range(&mut self, range: Range<usize>) {
        self.set_state_range(range, VisualState::Active);
    }

    /// Marks `range` as outside the working set.
    pub fn set_inactive_range(&mut self, range: Range<usize>) {
        self.set_state_range(range, VisualState::Inactive);
    }

    /// Marks `range` as in its final position.
    pub fn set_done_range(&mut self, range: Range<usize>) {
        self.set_state_range(range, VisualState::Done);
    }

    /// Returns the visual state of the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn state(&self, index: usize) -> VisualState {
        self.states[index]
    }

    /// Verifies the sequence is non-decreasing.
    ///
    /// On success the whole sequence is redrawn and presented once more. On
    /// failure nothing is drawn and the first inversion is reported.
    pub fn assert_sorted(&mut self) -> Result<(), IntegrityViolation> {
        if let Some(index) = self.sequence.first_inversion() {
            return Err(IntegrityViolation { index });
        }
        self.draw_all();
        self.surface.present();
        Ok(())
    }

    /// Runs `sort` on this array, then verifies the result.
    ///
    /// Returns the final statistics, [`RunError::Cancelled`] if the run was
    /// stopped, or [`RunError::Integrity`] if `sort` returned without
    /// sorting.
    pub fn run<F>(&mut self, sort: F) -> Result<OpStats, RunError>
    where
        F: FnOnce(&mut Self) -> SortResult<()>,
    {
        info!(size = self.len(), "sort run started");
        if let Err(cancelled) = sort(self) {
            info!(stats = %self.stats(), "sort run aborted");
            return Err(cancelled.into());
        }
        if let Err(violation) = self.assert_sorted() {
            warn!(index = violation.index, stats = %self.stats(), "{}", violation);
            return Err(violation.into());
        }
        let stats = self.stats();
        info!(%stats, frames = self.scheduler.frames(), "sort run finished");
        Ok(stats)
    }

    /// Requests cancellation. Idempotent; see also [`stop_handle`](Self::stop_handle)
    /// for requesting from another thread.
    pub fn request_stop(&self) {
        self.stop.request_stop();
    }

    /// Returns true once a stop has been requested.
    #[inline]
    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_stop_requested()
    }

    /// Returns a handle that can stop this array from any thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Completed comparisons so far.
    #[inline]
    pub fn comparison_count(&self) -> u64 {
        self.counters.comparisons()
    }

    /// Completed swaps so far.
    #[inline]
    pub fn swap_count(&self) -> u64 {
        self.counters.swaps()
    }

    /// Snapshot of both counters.
    pub fn stats(&self) -> OpStats {
        self.counters.snapshot()
    }

    /// Shared counters, readable from any thread while the sort runs.
    pub fn counters(&self) -> Arc<OperationCounters> {
        Arc::clone(&self.counters)
    }

    /// Pacing parameters derived at construction.
    #[inline]
    pub fn budget(&self) -> &RenderBudget {
        self.scheduler.budget()
    }

    /// The configuration this array was built from.
    #[inline]
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// The drawing surface.
    #[inline]
    pub fn canvas(&self) -> &S {
        &self.surface
    }

    /// The drawing surface, mutably. Drawing into it directly is
    /// overwritten by the next redraw of the affected rows.
    #[inline]
    pub fn canvas_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the array and returns its surface.
    pub fn into_canvas(self) -> S {
        self.surface
    }

    fn ensure_running(&mut self) -> SortResult<()> {
        let result = self.stop.check();
        if result.is_err() {
            self.note_stop();
        }
        result
    }

    fn note_stop(&mut self) {
        if !self.stop_observed {
            self.stop_observed = true;
            debug!(stats = %self.stats(), "stop observed by worker");
        }
    }

    fn check_bounds(&self, i: usize, j: usize) {
        let len = self.len();
        assert!(
            i < len && j < len,
            "index out of bounds: the len is {len} but the indices are {i} and {j}"
        );
    }

    /// Counts one operation and, at a frame boundary, presents and pauses.
    fn advance(&mut self) -> SortResult<()> {
        match self.scheduler.step() {
            FrameAction::Continue => Ok(()),
            FrameAction::Present { full_redraw } => {
                if full_redraw {
                    self.draw_all();
                }
                self.surface.present();
                if let Err(cancelled) = self.scheduler.pause() {
                    self.note_stop();
                    return Err(cancelled);
                }
                Ok(())
            }
        }
    }

    /// Redraws `range` unless lazy mode defers it to the next frame.
    fn redraw(&mut self, range: Range<usize>) {
        if self.scheduler.draws_partial() {
            self.painter
                .draw_range(&mut self.surface, &self.sequence, &self.states, range);
        }
    }

    fn draw_all(&mut self) {
        self.painter
            .draw_all(&mut self.surface, &self.sequence, &self.states);
    }

    #[cfg(test)]
    pub(crate) fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    #[cfg(test)]
    pub(crate) fn steps_since_frame(&self) -> u64 {
        self.scheduler.steps_since_frame()
    }
}

impl<S: Surface> SortArray for VisualSortArray<S> {
    fn len(&self) -> usize {
        VisualSortArray::len(self)
    }

    fn compare(&mut self, i: usize, j: usize) -> SortResult<Ordering> {
        VisualSortArray::compare(self, i, j)
    }

    fn swap(&mut self, i: usize, j: usize) -> SortResult<()> {
        VisualSortArray::swap(self, i, j)
    }

    fn set_active(&mut self, index: usize) {
        VisualSortArray::set_active(self, index);
    }

    fn set_inactive(&mut self, index: usize) {
        VisualSortArray::set_inactive(self, index);
    }

    fn set_done(&mut self, index: usize) {
        VisualSortArray::set_done(self, index);
    }

    fn set_active_range(&mut self, range: Range<usize>) {
        VisualSortArray::set_active_range(self, range);
    }

    fn set_inactive_range(&mut self, range: Range<usize>) {
        VisualSortArray::set_inactive_range(self, range);
    }

    fn set_done_range(&mut self, range: Range<usize>) {
        VisualSortArray::set_done_range(self, range);
    }
}

impl<S: Surface> std::fmt::Debug for VisualSortArray<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualSortArray")
            .field("len", &self.len())
            .field("budget", self.budget())
            .field("stats", &self.stats())
            .field("stop_requested", &self.is_stop_requested())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Cancelled;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sortvis_core::{Color, Rect, Size};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Fill(Rect),
        Present,
    }

    /// Records drawing calls instead of rasterizing them.
    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn presents(&self) -> usize {
            self.calls.iter().filter(|c| **c == Call::Present).count()
        }

        fn fills(&self) -> usize {
            self.calls.len() - self.presents()
        }

        fn clear(&mut self) {
            self.calls.clear();
        }
    }

    impl Surface for Recorder {
        fn size(&self) -> Size {
            Size::new(0, 0)
        }

        fn fill_rect(&mut self, rect: Rect, _color: Color) {
            self.calls.push(Call::Fill(rect));
        }

        fn present(&mut self) {
            self.calls.push(Call::Present);
        }
    }

    fn recorded(size: usize, speed: f64) -> VisualSortArray<Recorder> {
        let config = VisualizerConfig::new(size, 1, speed);
        let mut rng = StdRng::seed_from_u64(7);
        VisualSortArray::with_surface_and_rng(config, Recorder::default(), &mut rng).unwrap()
    }

    mod construction_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_rejects_invalid_config() {
            let config = VisualizerConfig::new(0, 1, 100.0);
            assert_eq!(
                VisualSortArray::with_surface(config, Recorder::default()).unwrap_err(),
                ConfigError::EmptySequence
            );
        }

        #[test]
        fn test_initial_draw_and_present() {
            let arr = recorded(5, 100.0);
            let calls = &arr.canvas().calls;
            // background, five bars, present
            assert_eq!(calls.len(), 7);
            assert_eq!(calls[0], Call::Fill(Rect::new(0, 0, 5, 5)));
            assert_eq!(calls[6], Call::Present);
            assert_eq!(arr.stats(), OpStats::default());
        }

        #[test]
        fn test_starts_as_permutation_all_active() {
            let arr = recorded(32, 100.0);
            let mut values = arr.sequence().values().to_vec();
            values.sort_unstable();
            assert_eq!(values, (0..32).collect::<Vec<_>>());
            assert!((0..32).all(|i| arr.state(i) == VisualState::Active));
        }

        #[test]
        fn test_same_seed_same_permutation() {
            let a = recorded(16, 100.0);
            let b = recorded(16, 100.0);
            assert_eq!(a.sequence().values(), b.sequence().values());
        }

        #[test]
        fn test_new_owns_shared_canvas() {
            let arr = VisualSortArray::new(VisualizerConfig::new(4, 3, 100.0)).unwrap();
            assert_eq!(arr.canvas().size(), Size::new(12, 12));
            assert_eq!(arr.canvas().frame_count(), 1);
        }
    }

    mod operation_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_compare_matches_sequence_and_counts() {
            let mut arr = recorded(6, 5000.0);
            for (i, j) in [(0, 1), (2, 5), (4, 4)] {
                let expected = arr.sequence().compare(i, j);
                assert_eq!(arr.compare(i, j), Ok(expected));
            }
            assert_eq!(arr.comparison_count(), 3);
            assert_eq!(arr.swap_count(), 0);
        }

        #[test]
        fn test_compare_leaves_elements_active() {
            let mut arr = recorded(4, 5000.0);
            arr.set_done(1);
            arr.compare(1, 2).unwrap();
            assert_eq!(arr.state(1), VisualState::Active);
            assert_eq!(arr.state(2), VisualState::Active);
        }

        #[test]
        fn test_swap_exchanges_and_counts_self_swap() {
            let mut arr = recorded(4, 5000.0);
            let before = arr.sequence().values().to_vec();
            arr.swap(0, 3).unwrap();
            arr.swap(2, 2).unwrap();
            let after = arr.sequence().values();
            assert_eq!(after[0], before[3]);
            assert_eq!(after[3], before[0]);
            assert_eq!(after[2], before[2]);
            assert_eq!(arr.swap_count(), 2);
        }

        #[test]
        #[should_panic(expected = "index out of bounds")]
        fn test_out_of_bounds_panics() {
            let mut arr = recorded(4, 5000.0);
            let _ = arr.compare(0, 4);
        }

        #[test]
        fn test_annotations_set_states() {
            let mut arr = recorded(6, 5000.0);
            arr.set_inactive_range(0..3);
            arr.set_done(5);
            arr.set_active(1);
            let states: Vec<_> = (0..6).map(|i| arr.state(i)).collect();
            assert_eq!(
                states,
                vec![
                    VisualState::Inactive,
                    VisualState::Active,
                    VisualState::Inactive,
                    VisualState::Active,
                    VisualState::Active,
                    VisualState::Done,
                ]
            );
            assert_eq!(arr.stats(), OpStats::default());
        }

        #[test]
        fn test_works_through_trait() {
            fn bubble<A: SortArray>(arr: &mut A) -> SortResult<()> {
                for end in (1..arr.len()).rev() {
                    for i in 0..end {
                        if arr.compare(i, i + 1)?.is_gt() {
                            arr.swap(i, i + 1)?;
                        }
                    }
                    arr.set_done(end);
                }
                Ok(())
            }
            let mut arr = recorded(10, 5000.0);
            bubble(&mut arr).unwrap();
            assert!(arr.sequence().is_sorted());
            assert_eq!(arr.comparison_count(), 45);
        }
    }

    mod scheduling_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_annotation_draws_immediately_without_presenting() {
            let mut arr = recorded(8, 100.0);
            arr.canvas_mut().clear();
            arr.set_done(3);
            assert_eq!(
                arr.canvas().calls,
                vec![
                    Call::Fill(Rect::new(0, 3, 8, 1)),
                    Call::Fill(Rect::new(0, 3, arr.sequence().value(3) as u32 + 1, 1)),
                ]
            );
        }

        #[test]
        fn test_presents_once_per_batch() {
            // speed 100 -> 2 steps per batch, 20ms delay
            let mut arr = recorded(8, 100.0);
            arr.canvas_mut().clear();
            arr.compare(0, 1).unwrap();
            assert_eq!(arr.canvas().presents(), 0);
            assert_eq!(arr.steps_since_frame(), 1);
            arr.swap(0, 1).unwrap();
            assert_eq!(arr.canvas().presents(), 1);
            assert_eq!(arr.steps_since_frame(), 0);
        }

        #[test]
        fn test_lazy_mode_draws_only_full_frames() {
            // speed 500 -> 10 steps per batch > 4 elements
            let mut arr = recorded(4, 500.0);
            assert!(arr.budget().is_lazy());
            arr.canvas_mut().clear();

            arr.set_done_range(0..4);
            for _ in 0..9 {
                arr.compare(0, 1).unwrap();
            }
            assert!(arr.canvas().calls.is_empty());

            arr.compare(2, 3).unwrap();
            // one full redraw: background + four bars, then present
            assert_eq!(arr.canvas().fills(), 5);
            assert_eq!(arr.canvas().presents(), 1);
            assert_eq!(arr.canvas().calls[0], Call::Fill(Rect::new(0, 0, 4, 4)));
        }
    }

    mod cancellation_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_stop_refuses_operations_without_counting() {
            let mut arr = recorded(8, 5000.0);
            arr.compare(0, 1).unwrap();
            let before = arr.sequence().values().to_vec();

            arr.request_stop();
            arr.request_stop();
            assert_eq!(arr.compare(0, 1), Err(Cancelled));
            assert_eq!(arr.swap(0, 1), Err(Cancelled));

            assert_eq!(arr.sequence().values(), before.as_slice());
            assert_eq!(
                arr.stats(),
                OpStats {
                    comparisons: 1,
                    swaps: 0
                }
            );
        }

        #[test]
        fn test_stop_handle_from_other_thread() {
            let mut arr = recorded(8, 1.0);
            let stop = arr.stop_handle();
            let controller = std::thread::spawn(move || {
                std::thread::sleep(std::time::Duration::from_millis(50));
                stop.request_stop();
            });
            // speed 1 -> 1000ms pause, cut short by the stop
            let start = std::time::Instant::now();
            assert_eq!(arr.swap(0, 1), Err(Cancelled));
            assert!(start.elapsed() < std::time::Duration::from_secs(1));
            controller.join().unwrap();

            assert_eq!(arr.swap_count(), 1);
            assert_eq!(arr.steps_since_frame(), 1);
            assert!(arr.is_stop_requested());
        }

        #[test]
        fn test_annotations_still_allowed_after_stop() {
            let mut arr = recorded(4, 5000.0);
            arr.request_stop();
            arr.set_done_range(0..4);
            assert_eq!(arr.state(3), VisualState::Done);
        }
    }

    mod verification_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        fn selection_sort<A: SortArray>(arr: &mut A) -> SortResult<()> {
            let n = arr.len();
            for i in 0..n {
                let mut min = i;
                for j in i + 1..n {
                    if arr.compare(j, min)?.is_lt() {
                        min = j;
                    }
                }
                arr.swap(i, min)?;
                arr.set_done(i);
            }
            Ok(())
        }

        #[test]
        fn test_assert_sorted_reports_inversion() {
            let mut arr = recorded(16, 5000.0);
            arr.canvas_mut().clear();
            let expected = arr.sequence().first_inversion().unwrap();
            assert_eq!(
                arr.assert_sorted(),
                Err(IntegrityViolation { index: expected })
            );
            assert!(arr.canvas().calls.is_empty());
        }

        #[test]
        fn test_run_sorts_and_presents_final_frame() {
            let mut arr = recorded(12, 5000.0);
            let stats = arr.run(|arr| selection_sort(arr)).unwrap();
            assert!(arr.sequence().is_sorted());
            assert_eq!(
                stats,
                OpStats {
                    comparisons: 66,
                    swaps: 12
                }
            );
            assert_eq!(arr.canvas().calls.last(), Some(&Call::Present));
        }

        #[test]
        fn test_run_reports_unsorted_result() {
            let mut arr = recorded(12, 5000.0);
            let err = arr.run(|_| Ok(())).unwrap_err();
            assert!(matches!(err, RunError::Integrity(_)));
        }

        #[test]
        fn test_run_reports_cancellation() {
            let mut arr = recorded(12, 5000.0);
            let err = arr
                .run(|arr| {
                    arr.request_stop();
                    selection_sort(arr)
                })
                .unwrap_err();
            assert!(err.is_cancelled());
            assert_eq!(arr.stats(), OpStats::default());
        }
    }
}
