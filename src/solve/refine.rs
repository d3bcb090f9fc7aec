//! Iterative majority refinement of the label field
//!
//! Each pass replaces every pixel's label with one of the two dominant
//! labels of its surrounding window, subject to three filters:
//!
//! 1. **Betweenness**: a second-place label whose palette color lies
//!    almost exactly on the line between the first- and third-place
//!    colors is a blend artifact, not a real region; it is discarded in
//!    favor of the third-place label.
//! 2. **Minority suppression**: a second-place label with a marginal
//!    window count collapses the window to single-label.
//! 3. **Hysteresis**: a pixel whose current label is one of the two
//!    survivors only flips if the rival candidate is closer to the
//!    original source pixel by more than the inertia damping allows.
//!
//! The per-pixel window tally uses a caller-owned scratch counter sized to
//! the palette (reset via a touched-label list, not a full clear), so the
//! inner loop performs no heap allocation.

use crate::exec::Executor;
use crate::palette::table::MatchTable;

/// A second-place color counts as a betweenness artifact when the outer
/// pair's distance is at least this fraction of the summed inner legs.
const BETWEENNESS_FACTOR: f32 = 0.9;

/// Window fraction below which the second label is suppressed entirely.
const MINORITY_FRACTION: f32 = 0.10;

/// Scale of the hysteresis term: at full vertex inertia the current
/// label's distance is multiplied by `1 - 0.8 = 0.2`.
const INERTIA_DAMPING: f32 = 0.8;

/// Window radius and pass count derived from the edge-protection setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RefinePlan {
    pub radius: usize,
    pub iterations: usize,
}

/// Map `edge_protection` (0..=100) to a refinement plan via fixed
/// breakpoints. Zero (or below) disables refinement.
pub(crate) fn refine_plan(edge_protection: f32) -> Option<RefinePlan> {
    if edge_protection <= 0.0 {
        return None;
    }
    let (radius, iterations) = if edge_protection <= 33.0 {
        (1, 1)
    } else if edge_protection <= 66.0 {
        (2, 2)
    } else if edge_protection <= 85.0 {
        (3, 3)
    } else {
        (4, 5)
    };
    Some(RefinePlan { radius, iterations })
}

/// Reusable per-worker window tally.
struct Tally {
    /// Occurrence count per palette index. Fixed size, not a map.
    counts: Vec<u32>,
    /// Labels touched by the current window, for sparse reset.
    touched: Vec<u32>,
}

impl Tally {
    fn new(palette_len: usize, radius: usize) -> Self {
        let window = (2 * radius + 1) * (2 * radius + 1);
        Self {
            counts: vec![0; palette_len],
            touched: Vec::with_capacity(window.min(palette_len)),
        }
    }

    fn reset(&mut self) {
        for &label in &self.touched {
            self.counts[label as usize] = 0;
        }
        self.touched.clear();
    }
}

/// Run the planned refinement passes over a label field.
///
/// Each pass reads the previous pass's fully-settled grid and writes a
/// fresh one (ping-pong buffering), so results do not depend on pixel
/// visit order.
#[allow(clippy::too_many_arguments)]
pub(crate) fn refine_labels(
    labels: Vec<u32>,
    width: usize,
    height: usize,
    pixels_f: &[[f32; 3]],
    table: &MatchTable,
    plan: &RefinePlan,
    vertex_inertia: f32,
    executor: Executor,
) -> Vec<u32> {
    let stiffness = 1.0 - INERTIA_DAMPING * (vertex_inertia / 100.0).clamp(0.0, 1.0);
    let radius = plan.radius;

    let mut src = labels;
    let mut dst = vec![0u32; src.len()];

    for _ in 0..plan.iterations {
        {
            let src_ref = &src;
            executor.fill_rows(
                &mut dst,
                width,
                || Tally::new(table.len, radius),
                |tally, y, row| {
                    for (x, out) in row.iter_mut().enumerate() {
                        *out = resolve_pixel(
                            tally, src_ref, pixels_f, width, height, x, y, radius, table,
                            stiffness,
                        );
                    }
                },
            );
        }
        std::mem::swap(&mut src, &mut dst);
    }

    src
}

/// Compute one pixel's refined label from the settled `src` grid.
#[allow(clippy::too_many_arguments)]
fn resolve_pixel(
    tally: &mut Tally,
    src: &[u32],
    pixels_f: &[[f32; 3]],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    radius: usize,
    table: &MatchTable,
    stiffness: f32,
) -> u32 {
    tally.reset();

    let y0 = y.saturating_sub(radius);
    let y1 = (y + radius).min(height - 1);
    let x0 = x.saturating_sub(radius);
    let x1 = (x + radius).min(width - 1);

    let mut cells = 0u32;
    for wy in y0..=y1 {
        let base = wy * width;
        for wx in x0..=x1 {
            let label = src[base + wx];
            if tally.counts[label as usize] == 0 {
                tally.touched.push(label);
            }
            tally.counts[label as usize] += 1;
            cells += 1;
        }
    }

    // Top three labels by window count. Touched order (window scan order)
    // breaks ties deterministically.
    let (mut m1, mut c1) = (0u32, 0u32);
    let (mut m2, mut c2) = (0u32, 0u32);
    let (mut m3, mut c3) = (0u32, 0u32);
    for &label in &tally.touched {
        let c = tally.counts[label as usize];
        if c > c1 {
            (m3, c3) = (m2, c2);
            (m2, c2) = (m1, c1);
            (m1, c1) = (label, c);
        } else if c > c2 {
            (m3, c3) = (m2, c2);
            (m2, c2) = (label, c);
        } else if c > c3 {
            (m3, c3) = (label, c);
        }
    }

    // Betweenness filter: with three distinct labels present, a
    // second-place color lying on the m1..m3 line is a blend remnant.
    if c3 > 0 {
        let d12 = table.entry_dist(m1, m2);
        let d23 = table.entry_dist(m2, m3);
        let d13 = table.entry_dist(m1, m3);
        if d13 >= BETWEENNESS_FACTOR * (d12 + d23) {
            (m2, c2) = (m3, c3);
        }
    }

    // Minority suppression: a marginal runner-up makes the window
    // effectively single-label.
    let second = if c2 == 0 || (c2 as f32) < MINORITY_FRACTION * cells as f32 {
        m1
    } else {
        m2
    };

    let idx = y * width + x;
    let cur = src[idx];

    if cur != m1 && cur != second {
        // Clear outlier: snap to whichever dominant label is closer to
        // the current label's own palette color.
        if table.entry_dist(cur, m1) <= table.entry_dist(cur, second) {
            m1
        } else {
            second
        }
    } else {
        // The pixel already carries a dominant label; flip only if the
        // rival is closer to the original source color than the damped
        // current-label distance.
        let px = pixels_f[idx];
        let mut d1 = table.dist_sq_to(px, m1);
        let mut d2 = table.dist_sq_to(px, second);
        if cur == m1 {
            d1 *= stiffness;
        } else {
            d2 *= stiffness;
        }
        if d1 <= d2 {
            m1
        } else {
            second
        }
    }
}
