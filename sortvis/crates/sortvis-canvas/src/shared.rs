//! A double buffer shared between a drawing thread and a presenter.

use std::sync::Arc;

use parking_lot::Mutex;
use sortvis_core::{Color, Rect, Size};

use crate::{DoubleBuffer, PixelBuffer, Surface};

/// Thread-shared double-buffered canvas.
///
/// Cloning a [`SharedCanvas`] yields another handle to the same buffers.
/// The drawing side holds the lock only for the duration of a single
/// [`fill_rect`](Surface::fill_rect) or [`present`](Surface::present), so a
/// presenter can read the front buffer while the drawing thread is paused
/// or busy elsewhere.
///
/// # Examples
///
/// ```
/// use sortvis_canvas::{SharedCanvas, Surface};
/// use sortvis_core::{Color, Rect};
///
/// let mut canvas = SharedCanvas::new(4, 4, Color::WHITE);
/// let reader = canvas.clone();
///
/// canvas.fill_rect(Rect::new(0, 0, 1, 1), Color::RED);
/// canvas.present();
///
/// assert_eq!(reader.frame_count(), 1);
/// assert_eq!(reader.with_front(|front| front.get(0, 0)), Some(Color::RED));
/// ```
#[derive(Clone)]
pub struct SharedCanvas {
    inner: Arc<Mutex<DoubleBuffer>>,
    size: Size,
}

impl SharedCanvas {
    /// Creates a new shared canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DoubleBuffer::new(width, height, background))),
            size: Size::new(width, height),
        }
    }

    /// Returns the number of frames presented so far.
    pub fn frame_count(&self) -> u64 {
        self.inner.lock().frame_count()
    }

    /// Runs `f` with the front buffer (last presented frame).
    pub fn with_front<R>(&self, f: impl FnOnce(&PixelBuffer) -> R) -> R {
        f(self.inner.lock().front())
    }

    /// Runs `f` with the front buffer and the frame counter, read under one lock.
    pub fn with_frame<R>(&self, f: impl FnOnce(u64, &PixelBuffer) -> R) -> R {
        let guard = self.inner.lock();
        f(guard.frame_count(), guard.front())
    }
}

impl Surface for SharedCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.inner.lock().fill_rect(rect, color);
    }

    fn present(&mut self) {
        self.inner.lock().present();
    }
}

impl std::fmt::Debug for SharedCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCanvas")
            .field("size", &self.size)
            .field("frames", &self.frame_count())
            .finish()
    }
}
