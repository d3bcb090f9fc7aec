//! Palette builder and ordered palette storage

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::sample::ColorGroup;

/// One enabled recoloring unit fed to the palette builder: a source color
/// (what to match in the image), an optional remap target (what to write),
/// and a matching weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteSelection {
    /// The backing group's id, or a caller-chosen id for manual entries.
    pub id: u32,
    /// Source color used for matching. For a group-backed selection this
    /// defaults to the group representative.
    pub source: Rgb,
    /// Optional remap target. `None` writes the source color unchanged.
    pub target: Option<Rgb>,
    /// Matching weight. 1.0 is neutral; values above 1.0 enlarge this
    /// entry's effective distance in the reconstruction's local matching,
    /// biasing against noise matches. Squared into comparisons.
    pub weight: f32,
}

impl PaletteSelection {
    /// Selection backed by a group, matching its representative color.
    pub fn from_group(group: &ColorGroup) -> Self {
        Self {
            id: group.id,
            source: group.representative(),
            target: None,
            weight: 1.0,
        }
    }

    /// Standalone manual entry with no backing group.
    pub fn manual(id: u32, source: Rgb) -> Self {
        Self {
            id,
            source,
            target: None,
            weight: 1.0,
        }
    }

    /// Set the remap target.
    pub fn with_target(mut self, target: Rgb) -> Self {
        self.target = Some(target);
        self
    }

    /// Override the source color (e.g. a non-default group member).
    pub fn with_source(mut self, source: Rgb) -> Self {
        self.source = source;
        self
    }

    /// Set the matching weight.
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

/// One entry of a built palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    /// The originating selection's id.
    pub id: u32,
    /// Match-side color.
    pub rgb: Rgb,
    /// Output-side color, if remapped.
    pub target: Option<Rgb>,
    /// Matching weight (see [`PaletteSelection::weight`]).
    pub weight: f32,
}

impl PaletteColor {
    /// Canonical hex form of the match-side color.
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }

    /// The color actually written to pixels: the target if present, else
    /// the source.
    #[inline]
    pub fn output_rgb(&self) -> Rgb {
        self.target.unwrap_or(self.rgb)
    }
}

/// An ordered match palette and its parallel output palette.
///
/// Entry order is the order of the selections passed to [`build_palette`]
/// and is stable across rebuilds of the same selection set. Downstream
/// stages treat the entry *index* (not the id) as the working currency:
/// the label field stores indices into this palette.
///
/// An empty pair is a valid state meaning "no recoloring"; the high-level
/// API short-circuits it rather than erroring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PalettePair {
    entries: Vec<PaletteColor>,
}

impl PalettePair {
    /// Number of palette entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the palette has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in palette-index order.
    #[inline]
    pub fn entries(&self) -> &[PaletteColor] {
        &self.entries
    }

    /// Match-side color at `idx`.
    #[inline]
    pub fn match_color(&self, idx: usize) -> Rgb {
        self.entries[idx].rgb
    }

    /// Output-side color at `idx`.
    #[inline]
    pub fn output_color(&self, idx: usize) -> Rgb {
        self.entries[idx].output_rgb()
    }
}

/// Build a [`PalettePair`] from an ordered selection set.
///
/// The output order is exactly the input order. There are no error cases:
/// an empty selection set builds an empty pair, which downstream callers
/// treat as "recoloring disabled".
///
/// # Example
///
/// ```
/// use recolor::{build_palette, PaletteSelection, Rgb};
///
/// let selections = [
///     PaletteSelection::manual(0, Rgb::new(255, 0, 0)).with_target(Rgb::new(0, 128, 0)),
///     PaletteSelection::manual(1, Rgb::new(0, 0, 255)),
/// ];
/// let palette = build_palette(&selections);
///
/// assert_eq!(palette.match_color(0), Rgb::new(255, 0, 0));
/// assert_eq!(palette.output_color(0), Rgb::new(0, 128, 0));
/// assert_eq!(palette.output_color(1), Rgb::new(0, 0, 255));
/// ```
pub fn build_palette(selections: &[PaletteSelection]) -> PalettePair {
    let entries = selections
        .iter()
        .map(|s| PaletteColor {
            id: s.id,
            rgb: s.source,
            target: s.target,
            weight: s.weight,
        })
        .collect();
    PalettePair { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_selection_builds_empty_pair() {
        let pair = build_palette(&[]);
        assert!(pair.is_empty());
        assert_eq!(pair.len(), 0);
    }

    #[test]
    fn test_order_is_stable_across_rebuilds() {
        let selections = vec![
            PaletteSelection::manual(7, Rgb::new(1, 2, 3)),
            PaletteSelection::manual(3, Rgb::new(4, 5, 6)),
            PaletteSelection::manual(9, Rgb::new(7, 8, 9)),
        ];
        let a = build_palette(&selections);
        let b = build_palette(&selections);
        assert_eq!(a, b);
        let ids: Vec<u32> = a.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![7, 3, 9]);
    }

    #[test]
    fn test_match_and_output_sides_split() {
        let pair = build_palette(&[
            PaletteSelection::manual(0, Rgb::new(200, 0, 0)).with_target(Rgb::new(0, 200, 0)),
            PaletteSelection::manual(1, Rgb::new(0, 0, 200)),
        ]);
        // Match side is always the source color, pre-remap.
        assert_eq!(pair.match_color(0), Rgb::new(200, 0, 0));
        // Output side substitutes the target where present.
        assert_eq!(pair.output_color(0), Rgb::new(0, 200, 0));
        assert_eq!(pair.output_color(1), Rgb::new(0, 0, 200));
    }

    #[test]
    fn test_default_weight_is_neutral() {
        let pair = build_palette(&[PaletteSelection::manual(0, Rgb::new(1, 1, 1))]);
        assert_eq!(pair.entries()[0].weight, 1.0);
    }
}
