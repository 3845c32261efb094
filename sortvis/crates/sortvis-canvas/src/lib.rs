//! Double-buffered pixel canvas for the sort visualizer.
//!
//! This crate provides the drawing surface the instrumented array renders to:
//!
//! - [`Surface`] - The contract: fill a rectangle, present a frame
//! - [`PixelBuffer`] - A 2D grid of colors with clipped fills
//! - [`DoubleBuffer`] - Back buffer for drawing, front buffer for display
//! - [`SharedCanvas`] - A [`DoubleBuffer`] shared between a drawing thread
//!   and a presenter
//!
//! # Architecture
//!
//! 1. **Draw to the back buffer**: [`Surface::fill_rect`] writes pixels that
//!    are not yet visible.
//!
//! 2. **Present**: [`Surface::present`] copies the back buffer to the front
//!    buffer and bumps the frame counter.
//!
//! 3. **Display**: A presenter (see `sortvis-terminal`) polls the frame
//!    counter and draws the front buffer whenever it changes.
//!
//! # Examples
//!
//! ```
//! use sortvis_canvas::{SharedCanvas, Surface};
//! use sortvis_core::{Color, Rect};
//!
//! let mut canvas = SharedCanvas::new(32, 32, Color::WHITE);
//! canvas.fill_rect(Rect::new(0, 0, 12, 4), Color::BLUE);
//! canvas.present();
//!
//! assert_eq!(canvas.with_front(|frame| frame.get(11, 3)), Some(Color::BLUE));
//! ```

mod buffer;
mod double_buffer;
mod shared;
mod surface;

pub use buffer::PixelBuffer;
pub use double_buffer::DoubleBuffer;
pub use shared::SharedCanvas;
pub use surface::Surface;

// Re-export core types for convenience
pub use sortvis_core::{Color, Rect, Size};
