//! Terminal presenter for sortvis canvases.
//!
//! This crate draws a [`SharedCanvas`] in a terminal while a sort runs on
//! another thread:
//! - [`TerminalBackend`] trait for the terminal operations used
//! - [`CrosstermBackend`] implementation using crossterm
//! - [`TerminalPresenter`] polling the canvas and drawing new frames
//! - [`FramePacer`] capping the presentation rate
//!
//! Every terminal cell shows two pixels with an upper half block glyph, so a
//! square canvas stays roughly square on screen.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use std::thread;
//!
//! use sortvis_canvas::{SharedCanvas, Surface};
//! use sortvis_core::{Color, Rect};
//! use sortvis_terminal::TerminalPresenter;
//!
//! fn main() -> sortvis_core::Result<()> {
//!     let canvas = SharedCanvas::new(32, 32, Color::WHITE);
//!     let finished = Arc::new(AtomicBool::new(false));
//!
//!     let mut drawing = canvas.clone();
//!     let flag = Arc::clone(&finished);
//!     let worker = thread::spawn(move || {
//!         for i in 0..32 {
//!             drawing.fill_rect(Rect::new(0, i, i + 1, 1), Color::BLUE);
//!             drawing.present();
//!             thread::sleep(std::time::Duration::from_millis(50));
//!         }
//!         flag.store(true, Ordering::Release);
//!     });
//!
//!     let mut presenter = TerminalPresenter::stdout();
//!     presenter.run(&canvas, || !finished.load(Ordering::Acquire))?;
//!     let _ = worker.join();
//!     Ok(())
//! }
//! ```

mod backend;
mod presenter;

pub use backend::{CrosstermBackend, TerminalBackend};
pub use presenter::{FramePacer, TerminalPresenter, UPPER_HALF_BLOCK};

/// Re-export core types for convenience.
pub use sortvis_core::{Color, Error, Result};

/// Re-export the canvas type the presenter reads.
pub use sortvis_canvas::SharedCanvas;
