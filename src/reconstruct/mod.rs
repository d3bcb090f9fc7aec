//! High-resolution reconstructor
//!
//! Upscales a solved label field back to output resolution. Each output
//! pixel maps to a native cell; the labels of the surrounding 5x5 native
//! window become blend candidates, the best two survive scoring, and the
//! resampled output color picks the blend ratio between their *output*
//! colors. Flat regions reproduce their output color exactly; boundaries
//! blend with a smoothing-controlled logistic profile.

mod blend;
mod candidates;

use serde::{Deserialize, Serialize};

use crate::api::{RecolorError, MAX_PIPELINE_PIXELS};
use crate::color::Rgb;
use crate::exec::Executor;
use crate::output::{LabelField, RecoloredImage};
use crate::palette::table::MatchTable;
use crate::palette::PalettePair;

use blend::{near_midpoint, project_t, shape_t};
use candidates::{mark_artifacts, select_top2, CandidateScratch, MIN_BLEND_WEIGHT};

/// Reconstruction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendSettings {
    /// Boundary smoothing in `0..=100`. 0 keeps edges hard (blend ratios
    /// collapse toward the anchors); 100 allows wide, gentle ramps.
    pub smoothing_levels: f32,
}

impl Default for BlendSettings {
    fn default() -> Self {
        Self {
            smoothing_levels: 50.0,
        }
    }
}

/// Reconstruct the output-resolution image from a solved label field.
///
/// `resampled` is the original image resampled to `out_width` x
/// `out_height` RGBA; it drives blend ratios but never contributes colors
/// of its own. All emitted colors are output-palette colors or pairwise
/// blends of them.
///
/// # Errors
///
/// - [`RecolorError::TooLarge`] if the output exceeds the pipeline ceiling
/// - [`RecolorError::BufferShape`] if `resampled` does not match the
///   stated dimensions
/// - [`RecolorError::LabelShape`] if the label grid is empty while the
///   output is not
/// - [`RecolorError::EmptyPalette`] if the palette has no entries
pub fn reconstruct(
    labels: &LabelField,
    resampled: &[u8],
    out_width: usize,
    out_height: usize,
    palette: &PalettePair,
    settings: &BlendSettings,
    executor: Executor,
) -> Result<RecoloredImage, RecolorError> {
    let pixel_count = out_width * out_height;
    if pixel_count > MAX_PIPELINE_PIXELS {
        return Err(RecolorError::TooLarge {
            pixels: pixel_count,
            max: MAX_PIPELINE_PIXELS,
        });
    }
    let expected = pixel_count * 4;
    if resampled.len() != expected {
        return Err(RecolorError::BufferShape {
            width: out_width,
            height: out_height,
            expected,
            actual: resampled.len(),
        });
    }
    if palette.is_empty() {
        return Err(RecolorError::EmptyPalette);
    }
    if pixel_count == 0 {
        return Ok(RecoloredImage::new(Vec::new(), out_width, out_height));
    }
    let (lw, lh) = (labels.width(), labels.height());
    if lw == 0 || lh == 0 {
        // A non-empty output needs at least one source label.
        return Err(RecolorError::LabelShape {
            width: lw,
            height: lh,
            expected: 1,
            actual: 0,
        });
    }

    let table = MatchTable::new(palette);
    let out_colors: Vec<Rgb> = (0..palette.len()).map(|i| palette.output_color(i)).collect();
    let intensity = (settings.smoothing_levels / 100.0).clamp(0.0, 1.0);
    let label_grid = labels.labels();

    let resampled_f: Vec<[f32; 3]> = (0..pixel_count)
        .map(|i| {
            let at = i * 4;
            [
                resampled[at] as f32,
                resampled[at + 1] as f32,
                resampled[at + 2] as f32,
            ]
        })
        .collect();

    tracing::debug!(
        out_width,
        out_height,
        label_width = lw,
        label_height = lh,
        smoothing = settings.smoothing_levels,
        "reconstructing output image"
    );

    let mut out = vec![0u8; expected];
    executor.fill_rows(
        &mut out,
        out_width * 4,
        || CandidateScratch::new(table.len),
        |scratch, oy, row| {
            let ly = ((oy * lh) / out_height).min(lh - 1);
            for ox in 0..out_width {
                let lx = ((ox * lw) / out_width).min(lw - 1);
                let px = resampled_f[oy * out_width + ox];

                scratch.gather(label_grid, lw, lh, lx, ly);
                let rgb = if scratch.cands.len() == 1 {
                    // Uniform window: emit the output color exactly.
                    out_colors[scratch.cands[0].label as usize]
                } else {
                    blend_pixel(
                        scratch,
                        &table,
                        &out_colors,
                        label_grid,
                        lw,
                        lh,
                        lx,
                        ly,
                        px,
                        &resampled_f,
                        out_width,
                        out_height,
                        ox,
                        oy,
                        intensity,
                    )
                };

                let at = ox * 4;
                row[at] = rgb.r;
                row[at + 1] = rgb.g;
                row[at + 2] = rgb.b;
                row[at + 3] = 255;
            }
        },
    );

    Ok(RecoloredImage::new(out, out_width, out_height))
}

/// Resolve one output pixel with more than one candidate label in view.
#[allow(clippy::too_many_arguments)]
fn blend_pixel(
    scratch: &mut CandidateScratch,
    table: &MatchTable,
    out_colors: &[Rgb],
    label_grid: &[u32],
    lw: usize,
    lh: usize,
    lx: usize,
    ly: usize,
    px: [f32; 3],
    resampled_f: &[[f32; 3]],
    out_width: usize,
    out_height: usize,
    ox: usize,
    oy: usize,
    intensity: f32,
) -> Rgb {
    mark_artifacts(&mut scratch.cands, table);

    let in_3x3 = |label: u32| {
        for dy in -1i32..=1 {
            let ny = ly as i32 + dy;
            if ny < 0 || ny >= lh as i32 {
                continue;
            }
            for dx in -1i32..=1 {
                let nx = lx as i32 + dx;
                if nx < 0 || nx >= lw as i32 {
                    continue;
                }
                if label_grid[ny as usize * lw + nx as usize] == label {
                    return true;
                }
            }
        }
        false
    };

    let (m1, m2) = select_top2(&mut scratch.cands, table, px, in_3x3);
    let cands = &scratch.cands;

    // The pixel's own cell label anchors the blend unless the artifact
    // filter rejected it.
    let core = label_grid[ly * lw + lx];
    let core_is_artifact = cands
        .iter()
        .find(|c| c.label == core)
        .map_or(true, |c| c.artifact);

    let (a_label, b_label) = if core_is_artifact {
        (cands[m1].label, cands[m2].label)
    } else if cands[m1].label != core {
        (core, cands[m1].label)
    } else {
        (core, cands[m2].label)
    };

    if a_label == b_label {
        return out_colors[a_label as usize];
    }

    // A marginal second presence in the window is not a real boundary.
    let b_weight = cands
        .iter()
        .find(|c| c.label == b_label)
        .map_or(0.0, |c| c.weight);
    if b_weight < MIN_BLEND_WEIGHT {
        return out_colors[a_label as usize];
    }

    let a_col = table.colors[a_label as usize];
    let b_col = table.colors[b_label as usize];
    let t = project_t(px, a_col, b_col);
    let t = shape_t(t, px, a_col, b_col, intensity, |mid| {
        for dy in -1i32..=1 {
            let ny = oy as i32 + dy;
            if ny < 0 || ny >= out_height as i32 {
                continue;
            }
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = ox as i32 + dx;
                if nx < 0 || nx >= out_width as i32 {
                    continue;
                }
                let sample = resampled_f[ny as usize * out_width + nx as usize];
                if near_midpoint(sample, mid) {
                    return true;
                }
            }
        }
        false
    });

    out_colors[a_label as usize].lerp(out_colors[b_label as usize], t)
}
