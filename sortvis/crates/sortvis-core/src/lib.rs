//! Core types for the sort visualizer.
//!
//! This crate provides the building blocks shared by the drawing surface,
//! the instrumented array and the presenters:
//!
//! - [`color`]: RGBA color representation with hex parsing and serde support
//! - [`geometry`]: Pixel geometry primitives ([`Size`], [`Rect`])
//! - [`error`]: Error types for the core library
//!
//! # Examples
//!
//! ```
//! use sortvis_core::{Color, Rect};
//!
//! let bar = Rect::new(0, 8, 24, 4);
//! let canvas = Rect::new(0, 0, 16, 16);
//! assert_eq!(bar.clamp_to(canvas), Rect::new(0, 8, 16, 4));
//!
//! let done = Color::from_hex("#25963D").unwrap();
//! assert_eq!(done.to_hex(), "#25963D");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]

pub mod color;
pub mod error;
pub mod geometry;

// Re-export commonly used types at the crate root for convenience
pub use color::Color;
pub use error::{ColorParseError, Error, Result};
pub use geometry::{Rect, Size};
