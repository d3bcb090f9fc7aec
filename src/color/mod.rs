//! Color types and conversion utilities
//!
//! This module provides the two color representations used by the pipeline:
//!
//! - **[`Rgb`]**: 8-bit-per-channel RGB. The storage and matching type; its
//!   canonical serialized form is a lowercase `#rrggbb` hex string.
//! - **[`Hsl`]**: hue/saturation/lightness. Used only for grouping and tint
//!   math, never for pixel storage.
//!
//! # Example
//!
//! ```
//! use recolor::{Rgb, Hsl};
//!
//! let red: Rgb = "#ff0000".parse().unwrap();
//! assert_eq!(red.to_hex(), "#ff0000");
//!
//! let hsl = Hsl::from(red);
//! assert_eq!(hsl.h, 0.0);
//! assert_eq!(hsl.s, 100.0);
//! ```

mod hsl;
mod rgb;
mod tint;

pub use hsl::{circular_mean_hue, Hsl};
pub use rgb::{ParseColorError, Rgb};
pub use tint::{apply_tint, TintSettings};
