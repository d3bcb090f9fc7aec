//! Precomputed match tables for the solver and reconstructor
//!
//! Palette colors never change during a pipeline run, so per-entry float
//! channels, squared weights and the full entry-to-entry distance matrix
//! are computed once up front. For palettes of at most a few hundred
//! entries the dense matrix is small and keeps the per-pixel inner loops
//! free of square roots.

use super::palette::PalettePair;

/// Precomputed match-palette data shared by the solver and reconstructor.
pub(crate) struct MatchTable {
    /// Match colors as f32 channel triples, palette-index order.
    pub colors: Vec<[f32; 3]>,
    /// Per-entry matching weight, squared (applied to squared distances).
    pub weights_sq: Vec<f32>,
    /// Dense entry-to-entry Euclidean distance matrix, row-major.
    dist: Vec<f32>,
    /// Palette length.
    pub len: usize,
}

impl MatchTable {
    pub fn new(palette: &PalettePair) -> Self {
        let len = palette.len();
        let colors: Vec<[f32; 3]> = (0..len).map(|i| palette.match_color(i).to_f32()).collect();
        let weights_sq: Vec<f32> = palette
            .entries()
            .iter()
            .map(|e| e.weight * e.weight)
            .collect();

        let mut dist = vec![0.0f32; len * len];
        for a in 0..len {
            for b in (a + 1)..len {
                let d = dist_sq(colors[a], colors[b]).sqrt();
                dist[a * len + b] = d;
                dist[b * len + a] = d;
            }
        }

        Self {
            colors,
            weights_sq,
            dist,
            len,
        }
    }

    /// Euclidean distance between two palette entries.
    #[inline]
    pub fn entry_dist(&self, a: u32, b: u32) -> f32 {
        self.dist[a as usize * self.len + b as usize]
    }

    /// Squared distance from a pixel to a palette entry.
    #[inline]
    pub fn dist_sq_to(&self, px: [f32; 3], idx: u32) -> f32 {
        dist_sq(px, self.colors[idx as usize])
    }

    /// Index of the nearest match color, ties broken by first occurrence.
    #[inline]
    pub fn nearest(&self, px: [f32; 3]) -> u32 {
        let mut best = 0u32;
        let mut best_dist = f32::MAX;
        for (i, &color) in self.colors.iter().enumerate() {
            let d = dist_sq(px, color);
            if d < best_dist {
                best_dist = d;
                best = i as u32;
            }
        }
        best
    }
}

/// Squared Euclidean distance between two f32 channel triples.
#[inline]
pub(crate) fn dist_sq(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::{build_palette, PaletteSelection};

    fn pair(colors: &[[u8; 3]]) -> PalettePair {
        let selections: Vec<PaletteSelection> = colors
            .iter()
            .enumerate()
            .map(|(i, &c)| PaletteSelection::manual(i as u32, Rgb::from_bytes(c)))
            .collect();
        build_palette(&selections)
    }

    #[test]
    fn test_distance_matrix_symmetric() {
        let table = MatchTable::new(&pair(&[[0, 0, 0], [255, 255, 255], [255, 0, 0]]));
        for a in 0..3u32 {
            for b in 0..3u32 {
                assert_eq!(table.entry_dist(a, b), table.entry_dist(b, a));
            }
            assert_eq!(table.entry_dist(a, a), 0.0);
        }
    }

    #[test]
    fn test_nearest_first_occurrence_tie_break() {
        // Two identical entries: the lower index must win.
        let table = MatchTable::new(&pair(&[[10, 10, 10], [10, 10, 10]]));
        assert_eq!(table.nearest([10.0, 10.0, 10.0]), 0);
        assert_eq!(table.nearest([200.0, 0.0, 0.0]), 0);
    }

    #[test]
    fn test_nearest_is_exact_for_palette_colors() {
        let table = MatchTable::new(&pair(&[[0, 0, 0], [128, 128, 128], [255, 255, 255]]));
        assert_eq!(table.nearest([0.0, 0.0, 0.0]), 0);
        assert_eq!(table.nearest([128.0, 128.0, 128.0]), 1);
        assert_eq!(table.nearest([255.0, 255.0, 255.0]), 2);
    }
}
