//! Instrumented, throttled array for visualizing comparison sorts.
//!
//! A sorting algorithm written against [`SortArray`] can run on a plain
//! [`Sequence`] or on a [`VisualSortArray`], which additionally:
//!
//! - counts every comparison and swap ([`OperationCounters`])
//! - tags elements with a [`VisualState`] and draws them as colored bars on
//!   a [`Surface`](sortvis_canvas::Surface)
//! - presents a frame every few operations and pauses between frames, as
//!   derived from the playback speed ([`RenderBudget`])
//! - stops cooperatively when any thread calls [`StopHandle::request_stop`]
//!
//! Cancellation is an ordinary error value: instrumented operations return
//! [`SortResult`], so algorithms unwind with `?` once a stop is requested.
//!
//! # Examples
//!
//! ```
//! use std::thread;
//! use sortvis_array::{SortArray, SortResult, VisualSortArray, VisualizerConfig};
//!
//! fn bubble_sort<A: SortArray>(arr: &mut A) -> SortResult<()> {
//!     for end in (1..arr.len()).rev() {
//!         for i in 0..end {
//!             if arr.compare(i, i + 1)?.is_gt() {
//!                 arr.swap(i, i + 1)?;
//!             }
//!         }
//!         arr.set_done(end);
//!     }
//!     arr.set_done(0);
//!     Ok(())
//! }
//!
//! let mut arr = VisualSortArray::new(VisualizerConfig::new(16, 2, 10_000.0)).unwrap();
//! let counters = arr.counters();
//!
//! let worker = thread::spawn(move || arr.run(|arr| bubble_sort(arr)));
//! let stats = worker.join().unwrap().unwrap();
//!
//! assert_eq!(stats.comparisons, 120);
//! assert_eq!(counters.snapshot(), stats);
//! ```

#![warn(missing_docs)]

mod budget;
mod cancel;
mod config;
mod counters;
mod error;
mod painter;
mod scheduler;
mod sequence;
mod state;
mod visual;

pub use budget::{RenderBudget, MIN_DELAY_MS};
pub use cancel::StopHandle;
pub use config::VisualizerConfig;
pub use counters::{OpStats, OperationCounters};
pub use error::{Cancelled, ConfigError, IntegrityViolation, RunError, SortResult};
pub use scheduler::{FrameAction, RenderScheduler};
pub use sequence::{Sequence, SortArray};
pub use state::{Palette, VisualState};
pub use visual::VisualSortArray;
