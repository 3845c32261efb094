//! Drawing the sequence as horizontal bars.

use std::ops::Range;

use sortvis_canvas::Surface;
use sortvis_core::Rect;

use crate::sequence::Sequence;
use crate::state::{Palette, VisualState};

/// Draws element `i` as a bar in row `i`, `(value + 1) * scale` pixels long
/// and `scale` pixels tall, colored by its visual state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BarPainter {
    scale: u32,
    palette: Palette,
}

impl BarPainter {
    pub(crate) fn new(scale: u32, palette: Palette) -> Self {
        Self { scale, palette }
    }

    /// Repaints rows `range` on `surface`: background first, then bars.
    ///
    /// Does not present.
    pub(crate) fn draw_range<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        sequence: &Sequence,
        states: &[VisualState],
        range: Range<usize>,
    ) {
        if range.is_empty() {
            return;
        }
        let scale = self.scale;
        let width = sequence.len() as u32 * scale;
        let top = range.start as u32 * scale;
        let rows = range.len() as u32 * scale;
        surface.fill_rect(Rect::new(0, top, width, rows), self.palette.background);

        for i in range {
            let length = (sequence.value(i) as u32 + 1) * scale;
            let color = self.palette.color_for(states[i]);
            surface.fill_rect(Rect::new(0, i as u32 * scale, length, scale), color);
        }
    }

    pub(crate) fn draw_all<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        sequence: &Sequence,
        states: &[VisualState],
    ) {
        self.draw_range(surface, sequence, states, 0..sequence.len());
    }
}
