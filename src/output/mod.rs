//! Output types for the recoloring pipeline
//!
//! [`LabelField`] is the solver's product: one `u32` palette index per
//! native pixel. [`RecoloredImage`] is the reconstructor's product: an
//! opaque RGBA buffer at output resolution.
//!
//! Labels are `u32` *everywhere*. A narrower label type in one backend and
//! a wider one in another is a known defect class in systems like this
//! (corrupted labels from silent index-width mismatches), so both types
//! validate buffer lengths at construction and there is exactly one label
//! width in the crate.

mod label_field;
mod recolored_image;

pub use label_field::LabelField;
pub use recolored_image::RecoloredImage;
