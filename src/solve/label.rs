//! Initial nearest-palette labeling

use crate::exec::Executor;
use crate::palette::table::MatchTable;

/// Assign each pixel the index of its nearest match-palette entry.
///
/// Squared Euclidean RGB distance; ties break to the first palette entry.
/// No weighting is applied at this stage -- entry weights only bias the
/// reconstruction's local matching.
pub(crate) fn initial_labels(
    pixels_f: &[[f32; 3]],
    width: usize,
    table: &MatchTable,
    executor: Executor,
) -> Vec<u32> {
    let mut labels = vec![0u32; pixels_f.len()];
    executor.fill_rows(
        &mut labels,
        width,
        || (),
        |_, y, row| {
            let base = y * width;
            for (x, label) in row.iter_mut().enumerate() {
                *label = table.nearest(pixels_f[base + x]);
            }
        },
    );
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::{build_palette, PaletteSelection};

    #[test]
    fn test_initial_labels_pick_nearest() {
        let palette = build_palette(&[
            PaletteSelection::manual(0, Rgb::new(0, 0, 0)),
            PaletteSelection::manual(1, Rgb::new(255, 255, 255)),
        ]);
        let table = MatchTable::new(&palette);
        let pixels = [
            [10.0, 10.0, 10.0],
            [250.0, 250.0, 250.0],
            [100.0, 100.0, 100.0],
            [200.0, 200.0, 200.0],
        ];
        let labels = initial_labels(&pixels, 2, &table, Executor::Scalar);
        assert_eq!(labels, vec![0, 1, 0, 1]);
    }
}
