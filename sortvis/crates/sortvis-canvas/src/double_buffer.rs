//! Double-buffering for tear-free presentation.
//!
//! Drawing happens on the "back" buffer while the "front" buffer holds the
//! last presented frame. Presenting copies the back buffer to the front,
//! so partial redraws keep accumulating on the back buffer between frames.

use sortvis_core::{Color, Rect, Size};

use crate::{PixelBuffer, Surface};

/// Double-buffered pixel canvas.
///
/// [`DoubleBuffer`] manages two buffers:
/// - **Front buffer**: The last presented frame, read by presenters
/// - **Back buffer**: Where drawing happens
///
/// # Examples
///
/// ```
/// use sortvis_canvas::{DoubleBuffer, Surface};
/// use sortvis_core::{Color, Rect};
///
/// let mut db = DoubleBuffer::new(8, 8, Color::WHITE);
/// db.fill_rect(Rect::new(0, 0, 4, 1), Color::BLUE);
/// assert_eq!(db.front().get(0, 0), Some(Color::WHITE));
///
/// db.present();
/// assert_eq!(db.front().get(0, 0), Some(Color::BLUE));
/// assert_eq!(db.frame_count(), 1);
/// ```
#[derive(Clone)]
pub struct DoubleBuffer {
    /// The front buffer (last presented frame).
    front: PixelBuffer,
    /// The back buffer (being drawn to).
    back: PixelBuffer,
    /// Number of frames presented so far.
    frames: u64,
}

impl DoubleBuffer {
    /// Creates a new double buffer with both buffers filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            front: PixelBuffer::new(width, height, background),
            back: PixelBuffer::new(width, height, background),
            frames: 0,
        }
    }

    /// Returns the buffer width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.back.width()
    }

    /// Returns the buffer height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.back.height()
    }

    /// Returns a reference to the front buffer (last presented frame).
    #[inline]
    pub fn front(&self) -> &PixelBuffer {
        &self.front
    }

    /// Returns a reference to the back buffer (being drawn to).
    #[inline]
    pub fn back(&self) -> &PixelBuffer {
        &self.back
    }

    /// Returns the number of frames presented since creation.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Counts pixels drawn on the back buffer since the last presentation.
    pub fn pending_changes(&self) -> usize {
        self.back.count_differences(&self.front)
    }
}

impl Surface for DoubleBuffer {
    fn size(&self) -> Size {
        self.back.size()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.back.fill_rect(rect, color);
    }

    fn present(&mut self) {
        self.front.copy_from(&self.back);
        self.frames += 1;
    }
}
