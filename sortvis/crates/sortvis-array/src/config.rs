//! Construction configuration for [`VisualSortArray`](crate::VisualSortArray).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::Palette;

/// Sequence length, drawing scale, playback speed and colors.
///
/// `speed` is an abstract positive unit: higher is faster. It maps to the
/// pause between frames and the number of operations per frame, see
/// [`RenderBudget`](crate::RenderBudget).
///
/// # Examples
///
/// ```
/// use sortvis_array::VisualizerConfig;
///
/// let config = VisualizerConfig::from_toml_str(
///     r##"
///     size = 64
///     scale = 2
///     speed = 250.0
///
///     [palette]
///     background = "#000000"
///     "##,
/// )
/// .unwrap();
///
/// assert_eq!(config.size, 64);
/// assert_eq!(config.canvas_side().unwrap(), 128);
/// assert_eq!(config.palette.background.to_hex(), "#000000");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Number of elements; the sequence is a permutation of `0..size`.
    pub size: usize,
    /// Pixels per element along both axes.
    pub scale: u32,
    /// Playback speed.
    pub speed: f64,
    /// Colors for the background and each visual state.
    pub palette: Palette,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            size: 100,
            scale: 4,
            speed: 100.0,
            palette: Palette::default(),
        }
    }
}

impl VisualizerConfig {
    /// Creates a configuration with the given size, scale and speed and the
    /// default palette.
    pub fn new(size: usize, scale: u32, speed: f64) -> Self {
        Self {
            size,
            scale,
            speed,
            palette: Palette::default(),
        }
    }

    /// Sets the sequence length.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets the pixels per element.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the playback speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Parses and validates a TOML document.
    ///
    /// Missing keys take their default values.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a drawable sequence.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::EmptySequence);
        }
        if self.scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        self.canvas_side().map(|_| ())
    }

    /// Returns the canvas side length in pixels (`size * scale`).
    ///
    /// Bars are drawn one per row and may extend across the full width, so
    /// the canvas is square.
    pub fn canvas_side(&self) -> Result<u32, ConfigError> {
        u32::try_from(self.size)
            .ok()
            .and_then(|size| size.checked_mul(self.scale))
            .ok_or(ConfigError::CanvasTooLarge {
                size: self.size,
                scale: self.scale,
                max: u32::MAX,
            })
    }
}
