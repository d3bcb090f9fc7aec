//! Color sampling and grouping
//!
//! This module turns a pixel buffer (or markup text) into weighted color
//! clusters. Sampling is bounded: raster images are stride-sampled down to
//! roughly 50k samples regardless of size, and markup text contributes
//! one sample per color literal.
//!
//! Grouping is greedy single-link clustering over the frequency-sorted
//! sample set. It is intentionally order-dependent rather than globally
//! optimal; the guaranteed property is determinism -- identical input
//! always produces byte-identical groups.

mod cluster;
mod markup;
mod raster;

pub use cluster::{ColorGroup, ColorInstance, Extraction, GroupEditError};
pub use markup::extract_groups_from_markup;
pub use raster::{extract_groups, SampleError};
