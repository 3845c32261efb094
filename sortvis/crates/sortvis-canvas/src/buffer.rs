//! Pixel buffer storage and manipulation.

use sortvis_core::{Color, Rect, Size};

/// A 2D buffer of pixels.
///
/// Pixels are stored in row-major order. All drawing operations clip to the
/// buffer bounds, so callers may pass rectangles that overhang the edges.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left pixel
/// - X increases to the right (columns)
/// - Y increases downward (rows)
///
/// # Examples
///
/// ```
/// use sortvis_canvas::PixelBuffer;
/// use sortvis_core::{Color, Rect};
///
/// let mut buffer = PixelBuffer::new(16, 16, Color::WHITE);
/// buffer.fill_rect(Rect::new(0, 4, 8, 4), Color::BLUE);
/// assert_eq!(buffer.get(7, 7), Some(Color::BLUE));
/// assert_eq!(buffer.get(8, 7), Some(Color::WHITE));
/// ```
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    /// Pixel storage in row-major order.
    pixels: Vec<Color>,

    /// Buffer width in pixels.
    width: u32,

    /// Buffer height in pixels.
    height: u32,
}

impl PixelBuffer {
    /// Creates a new buffer with every pixel set to `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let len = width as usize * height as usize;
        Self {
            pixels: vec![fill; len],
            width,
            height,
        }
    }

    /// Returns the buffer width.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the buffer dimensions.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns true if the buffer has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns a rectangle covering the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Converts (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Gets the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Returns a slice of the underlying pixel storage.
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Returns a slice of pixels for a specific row.
    ///
    /// Returns `None` if the row is out of bounds.
    pub fn row(&self, y: u32) -> Option<&[Color]> {
        if y < self.height {
            let start = y as usize * self.width as usize;
            let end = start + self.width as usize;
            Some(&self.pixels[start..end])
        } else {
            None
        }
    }

    /// Returns a mutable slice of pixels for a specific row.
    ///
    /// Returns `None` if the row is out of bounds.
    fn row_mut(&mut self, y: u32) -> Option<&mut [Color]> {
        if y < self.height {
            let start = y as usize * self.width as usize;
            let end = start + self.width as usize;
            Some(&mut self.pixels[start..end])
        } else {
            None
        }
    }

    /// Fills a rectangular region with a color, clipped to the buffer.
    ///
    /// Returns the number of pixels written.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> usize {
        let effective = rect.clamp_to(self.bounds());
        if effective.is_empty() {
            return 0;
        }

        let x_start = effective.x as usize;
        let x_end = effective.right() as usize;

        for y in effective.rows() {
            if let Some(row) = self.row_mut(y) {
                row[x_start..x_end].fill(color);
            }
        }

        effective.area() as usize
    }

    /// Copies every pixel from `other` into this buffer.
    ///
    /// Reuses the existing allocation when the dimensions match.
    pub fn copy_from(&mut self, other: &Self) {
        if self.size() == other.size() {
            self.pixels.copy_from_slice(&other.pixels);
        } else {
            self.pixels.clone_from(&other.pixels);
            self.width = other.width;
            self.height = other.height;
        }
    }

    /// Counts pixels that differ from `other`.
    ///
    /// Buffers of different sizes are considered entirely different.
    pub fn count_differences(&self, other: &Self) -> usize {
        if self.size() != other.size() {
            return self.len().max(other.len());
        }
        self.pixels
            .iter()
            .zip(&other.pixels)
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
