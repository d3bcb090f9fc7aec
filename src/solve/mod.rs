//! Low-resolution label solver
//!
//! Assigns every native pixel a match-palette index, then (when edge
//! protection is enabled) iteratively cleans the index field with a
//! majority filter that removes single-pixel noise and blend artifacts
//! while preserving real region boundaries.
//!
//! Each refinement iteration reads a fully-settled grid from the previous
//! iteration and writes to a scratch grid (ping-pong double buffering,
//! never in-place mutation), so the result is independent of pixel visit
//! order and identical across execution backends.

mod label;
mod refine;

use serde::{Deserialize, Serialize};

use crate::api::{RecolorError, MAX_PIPELINE_PIXELS};
use crate::exec::Executor;
use crate::output::LabelField;
use crate::palette::table::MatchTable;
use crate::palette::PalettePair;

pub(crate) use refine::{refine_labels, refine_plan};

/// Solver parameters, both in `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveSettings {
    /// How aggressively to clean the label field. 0 disables refinement;
    /// higher values use a larger majority window and more iterations.
    pub edge_protection: f32,
    /// Hysteresis: resistance to flipping a pixel away from its current
    /// label when a neighboring color is only marginally closer.
    pub vertex_inertia: f32,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self {
            edge_protection: 50.0,
            vertex_inertia: 50.0,
        }
    }
}

/// Solve the label field for a native-resolution RGBA buffer.
///
/// Every pixel is assigned the index of the nearest match-palette entry
/// (squared Euclidean RGB distance, ties to the first entry), after which
/// the majority-refinement passes derived from
/// [`edge_protection`](SolveSettings::edge_protection) run. A palette of
/// size 1 degenerates to "every pixel gets that label".
///
/// # Errors
///
/// - [`RecolorError::BufferShape`] if `pixels.len() != width * height * 4`
/// - [`RecolorError::EmptyPalette`] if the palette has no entries
/// - [`RecolorError::TooLarge`] if the buffer exceeds the pipeline ceiling
pub fn solve_labels(
    pixels: &[u8],
    width: usize,
    height: usize,
    palette: &PalettePair,
    settings: &SolveSettings,
    executor: Executor,
) -> Result<LabelField, RecolorError> {
    let pixel_count = width * height;
    let expected = pixel_count * 4;
    if pixels.len() != expected {
        return Err(RecolorError::BufferShape {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }
    if palette.is_empty() {
        return Err(RecolorError::EmptyPalette);
    }
    if pixel_count > MAX_PIPELINE_PIXELS {
        return Err(RecolorError::TooLarge {
            pixels: pixel_count,
            max: MAX_PIPELINE_PIXELS,
        });
    }

    if pixel_count == 0 {
        return LabelField::new(Vec::new(), width, height);
    }

    let table = MatchTable::new(palette);
    let pixels_f: Vec<[f32; 3]> = (0..pixel_count)
        .map(|i| {
            let at = i * 4;
            [
                pixels[at] as f32,
                pixels[at + 1] as f32,
                pixels[at + 2] as f32,
            ]
        })
        .collect();

    let mut labels = label::initial_labels(&pixels_f, width, &table, executor);

    if let Some(plan) = refine_plan(settings.edge_protection) {
        tracing::debug!(
            radius = plan.radius,
            iterations = plan.iterations,
            inertia = settings.vertex_inertia,
            "refining label field"
        );
        labels = refine_labels(
            labels,
            width,
            height,
            &pixels_f,
            &table,
            &plan,
            settings.vertex_inertia,
            executor,
        );
    }

    LabelField::new(labels, width, height)
}
