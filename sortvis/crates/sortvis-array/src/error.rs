//! Error types for instrumented sorting runs.

use thiserror::Error;

/// Cancellation signal raised by instrumented operations after a stop request.
///
/// Every instrumented `compare`/`swap` returns `Result<_, Cancelled>`; sort
/// algorithms propagate it with `?` until it reaches the run controller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("sort run cancelled")]
pub struct Cancelled;

/// The sequence was found out of order by [`assert_sorted`].
///
/// `index` is the first position whose value is smaller than its
/// predecessor.
///
/// [`assert_sorted`]: crate::VisualSortArray::assert_sorted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("sequence is not sorted: inversion between indices {} and {index}", .index - 1)]
pub struct IntegrityViolation {
    /// Position `i` such that `value[i - 1] > value[i]`.
    pub index: usize,
}

/// Outcome of a failed run driven by [`VisualSortArray::run`].
///
/// [`VisualSortArray::run`]: crate::VisualSortArray::run
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    /// The run was stopped before the algorithm finished.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    /// The algorithm finished but left the sequence unsorted.
    #[error(transparent)]
    Integrity(#[from] IntegrityViolation),
}

impl RunError {
    /// Returns true if the run was aborted by a stop request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Invalid visualizer configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The sequence length must be at least one.
    #[error("sequence size must be greater than zero")]
    EmptySequence,

    /// The pixel scale must be at least one.
    #[error("scale must be at least 1 pixel per element")]
    ZeroScale,

    /// The speed must be a finite, positive number.
    #[error("speed must be finite and positive, got {0}")]
    InvalidSpeed(f64),

    /// `size * scale` does not fit the canvas coordinate space.
    #[error("canvas side {size} x {scale} exceeds {max} pixels")]
    CanvasTooLarge {
        /// Requested sequence length.
        size: usize,
        /// Requested pixels per element.
        scale: u32,
        /// Largest supported canvas side.
        max: u32,
    },

    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias for instrumented operations.
pub type SortResult<T> = std::result::Result<T, Cancelled>;
