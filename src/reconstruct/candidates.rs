//! Candidate selection for the reconstructor
//!
//! For each output pixel the reconstructor considers the labels of a 5x5
//! native neighborhood, weighted by distance tier, filters out structural
//! blend artifacts, and keeps the two best-scoring survivors as the blend
//! pair.

use crate::palette::table::MatchTable;

/// Distance-tiered window weights: center cell, orthogonal/diagonal
/// neighbors, outer ring.
const WINDOW_WEIGHTS: [f32; 3] = [1.0, 0.5, 0.2];

/// Candidate pairs closer together than this cannot produce meaningful
/// artifacts; skip the betweenness test for them.
const ARTIFACT_MIN_SEPARATION: f32 = 10.0;

/// Slack on the triangle inequality when testing whether a candidate lies
/// near the segment between two stronger candidates.
const ARTIFACT_SLACK: f32 = 1.10;

/// Score penalty for a candidate label absent from the immediate 3x3
/// neighborhood.
const NON_ADJACENT_PENALTY: f32 = -1000.0;

/// A runner-up scoring at or below this is not actually adjacent or
/// plausible; the blend pair collapses to a single candidate.
const IMPLAUSIBLE_SCORE: f32 = -500.0;

/// An accumulated window weight below this on the non-anchor side means
/// the pixel is effectively single-color: no blend.
pub(crate) const MIN_BLEND_WEIGHT: f32 = 0.3;

/// One label observed in the 5x5 window.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub label: u32,
    /// Accumulated distance-tiered window weight.
    pub weight: f32,
    /// Marked by the structural artifact filter.
    pub artifact: bool,
    pub score: f32,
}

/// Reusable per-worker candidate scratch (no per-pixel allocation).
pub(crate) struct CandidateScratch {
    /// Accumulated weight per palette index; reset sparsely via `cands`.
    weights: Vec<f32>,
    /// Candidates in window-scan order (deterministic tie-breaking).
    pub cands: Vec<Candidate>,
}

impl CandidateScratch {
    pub fn new(palette_len: usize) -> Self {
        Self {
            weights: vec![0.0; palette_len],
            // A 5x5 window yields at most 25 distinct labels.
            cands: Vec::with_capacity(25),
        }
    }

    fn reset(&mut self) {
        for c in &self.cands {
            self.weights[c.label as usize] = 0.0;
        }
        self.cands.clear();
    }

    /// Accumulate the 5x5 window of labels around `(lx, ly)`.
    /// Out-of-bounds cells contribute nothing.
    pub fn gather(&mut self, labels: &[u32], lw: usize, lh: usize, lx: usize, ly: usize) {
        self.reset();
        for dy in -2i32..=2 {
            let ny = ly as i32 + dy;
            if ny < 0 || ny >= lh as i32 {
                continue;
            }
            for dx in -2i32..=2 {
                let nx = lx as i32 + dx;
                if nx < 0 || nx >= lw as i32 {
                    continue;
                }
                let ring = dx.abs().max(dy.abs()) as usize;
                let label = labels[ny as usize * lw + nx as usize];
                if self.weights[label as usize] == 0.0 {
                    self.cands.push(Candidate {
                        label,
                        weight: 0.0,
                        artifact: false,
                        score: 0.0,
                    });
                }
                self.weights[label as usize] += WINDOW_WEIGHTS[ring];
            }
        }
        for c in &mut self.cands {
            c.weight = self.weights[c.label as usize];
        }
    }
}

/// Mark candidates that lie near the line segment between two strictly
/// higher-weighted candidates: such a color is a resampling blend remnant,
/// not a real region. An artifact candidate remains usable if no
/// non-artifact alternative exists (`select_top2` handles that).
pub(crate) fn mark_artifacts(cands: &mut [Candidate], table: &MatchTable) {
    let n = cands.len();
    for i in 0..n {
        let wc = cands[i].weight;
        let lc = cands[i].label;
        'pairs: for a in 0..n {
            if a == i || cands[a].weight <= wc {
                continue;
            }
            for b in (a + 1)..n {
                if b == i || cands[b].weight <= wc {
                    continue;
                }
                let dab = table.entry_dist(cands[a].label, cands[b].label);
                if dab > ARTIFACT_MIN_SEPARATION
                    && table.entry_dist(cands[a].label, lc) + table.entry_dist(cands[b].label, lc)
                        < ARTIFACT_SLACK * dab
                {
                    cands[i].artifact = true;
                    break 'pairs;
                }
            }
        }
    }
}

/// Score every usable candidate and return the indices of the top two.
///
/// The score rewards window weight, requires presence in the immediate
/// 3x3 neighborhood (`adjacent`), and subtracts the weighted color error
/// between the output pixel's resampled color and the candidate's match
/// color. Artifact candidates are excluded unless nothing else survives.
/// A runner-up scoring at or below [`IMPLAUSIBLE_SCORE`] collapses the
/// pair to a single candidate.
pub(crate) fn select_top2(
    cands: &mut [Candidate],
    table: &MatchTable,
    px: [f32; 3],
    adjacent: impl Fn(u32) -> bool,
) -> (usize, usize) {
    let any_usable = cands.iter().any(|c| !c.artifact);

    for c in cands.iter_mut() {
        if any_usable && c.artifact {
            c.score = f32::MIN;
            continue;
        }
        let adjacency = if adjacent(c.label) {
            0.0
        } else {
            NON_ADJACENT_PENALTY
        };
        let error = (table.weights_sq[c.label as usize] * table.dist_sq_to(px, c.label)).sqrt();
        c.score = 10.0 * c.weight + adjacency - error;
    }

    let mut best = 0;
    for (i, c) in cands.iter().enumerate() {
        if c.score > cands[best].score {
            best = i;
        }
    }
    let mut second = best;
    for (i, c) in cands.iter().enumerate() {
        if i == best {
            continue;
        }
        if second == best || c.score > cands[second].score {
            second = i;
        }
    }
    if cands[second].score <= IMPLAUSIBLE_SCORE {
        second = best;
    }
    (best, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::{build_palette, PaletteSelection};

    fn table(colors: &[[u8; 3]]) -> MatchTable {
        let selections: Vec<PaletteSelection> = colors
            .iter()
            .enumerate()
            .map(|(i, &c)| PaletteSelection::manual(i as u32, Rgb::from_bytes(c)))
            .collect();
        MatchTable::new(&build_palette(&selections))
    }

    #[test]
    fn test_gather_weights_by_ring() {
        // 5x5 grid of label 0 with label 1 at the center and label 2 in
        // the outer ring.
        let mut labels = vec![0u32; 25];
        labels[12] = 1; // center
        labels[0] = 2; // corner of the outer ring
        let mut scratch = CandidateScratch::new(3);
        scratch.gather(&labels, 5, 5, 2, 2);

        let weight_of = |label: u32| {
            scratch
                .cands
                .iter()
                .find(|c| c.label == label)
                .map(|c| c.weight)
                .unwrap_or(0.0)
        };
        assert_eq!(weight_of(1), 1.0);
        assert_eq!(weight_of(2), 0.2);
        // 8 ring-1 cells at 0.5 plus 15 ring-2 cells at 0.2
        assert!((weight_of(0) - (8.0 * 0.5 + 15.0 * 0.2)).abs() < 1e-5);
    }

    #[test]
    fn test_gather_skips_out_of_bounds() {
        let labels = vec![0u32; 4];
        let mut scratch = CandidateScratch::new(1);
        scratch.gather(&labels, 2, 2, 0, 0);
        // Only the 2x2 in-bounds cells contribute: 1.0 + 3 * 0.5.
        assert!((scratch.cands[0].weight - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_midpoint_candidate_marked_artifact() {
        let table = table(&[[0, 0, 0], [200, 200, 200], [100, 100, 100]]);
        let mut cands = vec![
            Candidate {
                label: 0,
                weight: 3.0,
                artifact: false,
                score: 0.0,
            },
            Candidate {
                label: 1,
                weight: 2.0,
                artifact: false,
                score: 0.0,
            },
            Candidate {
                label: 2,
                weight: 0.5,
                artifact: false,
                score: 0.0,
            },
        ];
        mark_artifacts(&mut cands, &table);
        assert!(!cands[0].artifact);
        assert!(!cands[1].artifact);
        assert!(cands[2].artifact, "midpoint grey is a blend remnant");
    }

    #[test]
    fn test_close_pair_produces_no_artifact() {
        // Endpoints 5 apart are under the separation floor.
        let table = table(&[[0, 0, 0], [3, 3, 3], [1, 1, 1]]);
        let mut cands = vec![
            Candidate {
                label: 0,
                weight: 3.0,
                artifact: false,
                score: 0.0,
            },
            Candidate {
                label: 1,
                weight: 2.0,
                artifact: false,
                score: 0.0,
            },
            Candidate {
                label: 2,
                weight: 0.5,
                artifact: false,
                score: 0.0,
            },
        ];
        mark_artifacts(&mut cands, &table);
        assert!(!cands[2].artifact);
    }

    #[test]
    fn test_select_top2_prefers_adjacent_low_error() {
        let table = table(&[[255, 0, 0], [0, 0, 255], [0, 255, 0]]);
        let mut cands = vec![
            Candidate {
                label: 0,
                weight: 2.0,
                artifact: false,
                score: 0.0,
            },
            Candidate {
                label: 1,
                weight: 1.5,
                artifact: false,
                score: 0.0,
            },
            Candidate {
                label: 2,
                weight: 1.4,
                artifact: false,
                score: 0.0,
            },
        ];
        // Resampled color is red; green is not 3x3-adjacent.
        let (m1, m2) = select_top2(&mut cands, &table, [255.0, 0.0, 0.0], |l| l != 2);
        assert_eq!(cands[m1].label, 0);
        assert_eq!(cands[m2].label, 1);
    }

    #[test]
    fn test_non_adjacent_runner_up_collapses() {
        let table = table(&[[255, 0, 0], [0, 0, 255]]);
        let mut cands = vec![
            Candidate {
                label: 0,
                weight: 2.0,
                artifact: false,
                score: 0.0,
            },
            Candidate {
                label: 1,
                weight: 1.0,
                artifact: false,
                score: 0.0,
            },
        ];
        // Blue fails the adjacency gate entirely: its score lands below
        // the plausibility floor and the pair collapses.
        let (m1, m2) = select_top2(&mut cands, &table, [255.0, 0.0, 0.0], |l| l == 0);
        assert_eq!(m1, m2);
        assert_eq!(cands[m1].label, 0);
    }

    #[test]
    fn test_artifacts_usable_when_nothing_else_survives() {
        let table = table(&[[0, 0, 0], [100, 100, 100]]);
        let mut cands = vec![
            Candidate {
                label: 0,
                weight: 2.0,
                artifact: true,
                score: 0.0,
            },
            Candidate {
                label: 1,
                weight: 1.0,
                artifact: true,
                score: 0.0,
            },
        ];
        let (m1, _) = select_top2(&mut cands, &table, [0.0, 0.0, 0.0], |_| true);
        assert_eq!(cands[m1].label, 0);
    }
}
