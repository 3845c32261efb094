//! The drawing surface contract.

use sortvis_core::{Color, Rect, Size};

/// A buffered drawing surface.
///
/// Drawing calls land in an off-screen buffer; [`present`](Self::present)
/// publishes the buffer as the next visible frame. Implementations must clip
/// rectangles that extend beyond [`size`](Self::size).
pub trait Surface {
    /// Returns the surface dimensions in pixels.
    fn size(&self) -> Size;

    /// Fills a rectangular region with a color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Publishes the buffered drawing as the next frame.
    fn present(&mut self);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        (**self).fill_rect(rect, color);
    }

    fn present(&mut self) {
        (**self).present();
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        (**self).fill_rect(rect, color);
    }

    fn present(&mut self) {
        (**self).present();
    }
}
