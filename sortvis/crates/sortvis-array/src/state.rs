//! Per-element visual states and the colors they map to.

use serde::{Deserialize, Serialize};
use sortvis_core::Color;

/// The color-coded role of an element, independent of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    /// Part of the current working set.
    #[default]
    Active,
    /// Outside the current working set.
    Inactive,
    /// One of the two elements under comparison.
    Comparing,
    /// In its final position.
    Done,
}

/// Colors used to draw the sequence.
///
/// # Examples
///
/// ```
/// use sortvis_array::{Palette, VisualState};
///
/// let palette = Palette::default();
/// assert_eq!(palette.color_for(VisualState::Done).to_hex(), "#25963D");
/// assert_eq!(palette.background.to_hex(), "#FFFFFF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Color of [`VisualState::Active`] bars.
    pub active: Color,
    /// Color of [`VisualState::Inactive`] bars.
    pub inactive: Color,
    /// Color of [`VisualState::Comparing`] bars.
    pub comparing: Color,
    /// Color of [`VisualState::Done`] bars.
    pub done: Color,
    /// Fill behind the bars.
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            active: Color::from_rgb_u32(0x294099),
            inactive: Color::from_rgb_u32(0x959EBF),
            comparing: Color::from_rgb_u32(0xD4BA0D),
            done: Color::from_rgb_u32(0x25963D),
            background: Color::from_rgb_u32(0xFFFFFF),
        }
    }
}

impl Palette {
    /// Returns the bar color for `state`.
    #[inline]
    pub fn color_for(&self, state: VisualState) -> Color {
        match state {
            VisualState::Active => self.active,
            VisualState::Inactive => self.inactive,
            VisualState::Comparing => self.comparing,
            VisualState::Done => self.done,
        }
    }
}
