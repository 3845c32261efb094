//! Sortvis: live visualization of comparison sorts.
//!
//! A sort algorithm written against [`SortArray`](array::SortArray) runs on a
//! [`VisualSortArray`](array::VisualSortArray) that counts, colors and paces
//! each comparison and swap, drawing bars into a
//! [`SharedCanvas`](canvas::SharedCanvas). A presenter such as
//! [`TerminalPresenter`](terminal::TerminalPresenter) shows the canvas from
//! another thread.
//!
//! The facade re-exports the member crates:
//! - [`core`]: colors, geometry and core errors
//! - [`canvas`]: the double-buffered drawing surface
//! - [`array`]: the instrumented array, pacing and cancellation
//! - [`terminal`]: the terminal presenter
//!
//! # Example
//!
//! ```no_run
//! use std::thread;
//! use sortvis::prelude::*;
//!
//! fn selection_sort<A: SortArray>(arr: &mut A) -> SortResult<()> {
//!     let n = arr.len();
//!     for i in 0..n {
//!         let mut min = i;
//!         for j in i + 1..n {
//!             if arr.compare(j, min)?.is_lt() {
//!                 min = j;
//!             }
//!         }
//!         arr.swap(i, min)?;
//!         arr.set_done(i);
//!     }
//!     Ok(())
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut arr = VisualSortArray::new(VisualizerConfig::new(48, 1, 200.0))?;
//!     let canvas = arr.canvas().clone();
//!     let stop = arr.stop_handle();
//!
//!     let worker = thread::spawn(move || arr.run(|arr| selection_sort(arr)));
//!
//!     let mut presenter = TerminalPresenter::stdout();
//!     presenter.run(&canvas, || !worker.is_finished())?;
//!     stop.request_stop();
//!
//!     match worker.join() {
//!         Ok(Ok(stats)) => println!("sorted with {stats}"),
//!         Ok(Err(err)) => println!("{err}"),
//!         Err(_) => println!("sort thread panicked"),
//!     }
//!     Ok(())
//! }
//! ```

pub use sortvis_array as array;
pub use sortvis_canvas as canvas;
pub use sortvis_core as core;
pub use sortvis_terminal as terminal;

/// The types needed to write and run a visualized sort.
pub mod prelude {
    pub use sortvis_array::{
        Cancelled, OpStats, Palette, RunError, SortArray, SortResult, StopHandle, VisualSortArray,
        VisualState, VisualizerConfig,
    };
    pub use sortvis_canvas::{SharedCanvas, Surface};
    pub use sortvis_core::{Color, Rect, Size};
    pub use sortvis_terminal::{FramePacer, TerminalPresenter};
}
