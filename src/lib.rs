//! recolor: palette-constrained image recoloring
//!
//! This library recolors an image so that every output pixel is one of a
//! small set of palette colors, or a controlled blend of exactly two of
//! them. It is built for the "extract a palette, let the user remap it,
//! re-render the image" workflow: group the image's colors, pick a
//! representative per group, optionally retarget each representative, and
//! reconstruct the image under the new palette at any output size.
//!
//! # Quick Start
//!
//! The [`Recolorer`] builder is the primary entry point:
//!
//! ```
//! use recolor::{build_palette, extract_groups, PaletteSelection, Recolorer, Rgb};
//!
//! let pixels = vec![200u8, 40, 40, 255, 200, 40, 40, 255];
//! let extraction = extract_groups(&pixels, 2, 1, 10.0).unwrap();
//!
//! let selections: Vec<PaletteSelection> = extraction
//!     .groups
//!     .iter()
//!     .map(PaletteSelection::from_group)
//!     .collect();
//! let palette = build_palette(&selections);
//!
//! let result = Recolorer::new(palette)
//!     .recolor(&pixels, 2, 1, &pixels, 2, 1)
//!     .unwrap();
//! assert!(result.is_some());
//! ```
//!
//! # Match Palette vs Output Palette
//!
//! Every palette entry carries two colors with distinct jobs:
//!
//! - the **match** color (the group representative found in the source
//!   image) decides which pixels belong to the entry;
//! - the **output** color (the user's retarget, or the match color when
//!   unset) is what actually gets painted.
//!
//! Matching always runs against the source image's own colors, so
//! retargeting a group never changes *which* pixels it claims, only what
//! they become. Distances are squared Euclidean in RGB; the pipeline
//! deliberately stays in device space because both palettes are specified
//! there and exact reproduction of palette colors is the contract.
//!
//! # Pipeline Overview
//!
//! ```text
//! native RGBA                        resampled RGBA (output size)
//!     |                                   |
//!     v                                   |
//! [sample]  stride sampling, greedy       |
//!     |     grouping, density scoring     |
//!     v                                   |
//! [palette] match/output pairs from       |
//!     |     group representatives         |
//!     v                                   |
//! [solve]   nearest-label field +         |
//!     |     majority refinement           |
//!     |     (ping-pong iterations)        |
//!     v                                   v
//! [reconstruct]  5x5 candidate gather, artifact filter,
//!     |          top-2 scoring, projection + shaping
//!     v
//! RecoloredImage  (every pixel: one palette color or a 2-color blend)
//! ```
//!
//! The native buffer drives *labeling*; the resampled buffer drives
//! *blend ratios*. They can differ in resolution arbitrarily, which is
//! how the pipeline upscales: solve at native size, reconstruct at output
//! size.
//!
//! # Execution Backends
//!
//! Per-pixel phases run through an [`Executor`]: the scalar reference
//! backend or (with the `parallel` feature, on by default) a rayon-backed
//! thread pool. Both run the same kernels with the same float sequences,
//! so their outputs are bit-identical. Labels are `u32` throughout.
//!
//! # Degenerate Inputs
//!
//! Empty palettes and zero-group extractions are data, not errors: the
//! high-level [`Recolorer::recolor`] returns `Ok(None)` and callers show
//! the original image. Errors are reserved for misuse (buffer shapes that
//! contradict the stated dimensions, inputs over
//! [`MAX_PIPELINE_PIXELS`]).

pub mod api;
pub mod color;
pub mod exec;
pub mod output;
pub mod palette;
pub mod reconstruct;
pub mod sample;
pub mod solve;


pub use api::{fit_within_budget, RecolorError, Recolorer, MAX_PIPELINE_PIXELS};
pub use color::{apply_tint, circular_mean_hue, Hsl, ParseColorError, Rgb, TintSettings};
pub use exec::Executor;
pub use output::{LabelField, RecoloredImage};
pub use palette::{build_palette, PaletteColor, PalettePair, PaletteSelection};
pub use reconstruct::{reconstruct, BlendSettings};
pub use sample::{
    extract_groups, extract_groups_from_markup, ColorGroup, ColorInstance, Extraction,
    GroupEditError, SampleError,
};
pub use solve::{solve_labels, SolveSettings};
