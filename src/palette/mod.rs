//! Palette types and the palette builder
//!
//! The builder turns enabled groups, per-group overrides, and manual
//! entries into a [`PalettePair`]: a **match** side (the image's actual
//! source colors, used for every distance computation) and an **output**
//! side (the user's remap targets, used when writing pixels). Matching
//! against source colors while writing target colors is the essential
//! split -- matching decisions must see the image as it is, not as the
//! user wants it to look.

mod palette;
pub(crate) mod table;

pub use palette::{build_palette, PaletteColor, PalettePair, PaletteSelection};
