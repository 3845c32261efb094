//! Pixel geometry primitives.
//!
//! Canvas coordinates are unsigned: (0, 0) is the top-left pixel, x grows to
//! the right and y grows downward.
//!
//! ```text
//! (0,0) ──────► x
//!   │
//!   │
//!   ▼
//!   y
//! ```

/// A 2D size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// The width component.
    pub width: u32,
    /// The height component.
    pub height: u32,
}

impl Size {
    /// A zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Creates a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the area (width * height), widened to avoid overflow.
    #[inline]
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns whether either dimension is zero.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned rectangle in pixel coordinates.
///
/// # Examples
///
/// ```
/// use sortvis_core::geometry::Rect;
///
/// let rect = Rect::new(10, 20, 80, 24);
/// assert_eq!(rect.right(), 90);
/// assert_eq!(rect.bottom(), 44);
/// assert_eq!(rect.clamp_to(Rect::new(0, 0, 64, 32)), Rect::new(10, 20, 54, 12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// The x coordinate of the left edge.
    pub x: u32,
    /// The y coordinate of the top edge.
    pub y: u32,
    /// The width of the rectangle.
    pub width: u32,
    /// The height of the rectangle.
    pub height: u32,
}

impl Rect {
    /// A zero-sized rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Creates a new rectangle at the given position with the given size.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the size of the rectangle.
    #[inline]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the exclusive right edge, saturating at `u32::MAX`.
    #[inline]
    pub const fn right(self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Returns the exclusive bottom edge, saturating at `u32::MAX`.
    #[inline]
    pub const fn bottom(self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Returns the area of the rectangle.
    #[inline]
    pub const fn area(self) -> u64 {
        self.size().area()
    }

    /// Returns whether the rectangle has zero area.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the intersection of this rectangle with another.
    ///
    /// Returns `None` if the rectangles do not overlap.
    #[inline]
    pub fn intersection(self, other: Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Self::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Clamps this rectangle to fit within another rectangle.
    #[inline]
    pub fn clamp_to(self, bounds: Self) -> Self {
        self.intersection(bounds).unwrap_or(Self::ZERO)
    }

    /// Returns an iterator over the y coordinates covered by the rectangle.
    pub fn rows(self) -> impl Iterator<Item = u32> {
        self.y..self.bottom()
    }
}
