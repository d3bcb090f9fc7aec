//! Markup color extraction
//!
//! Pattern-scans markup text (SVG or similar) for color literals: hex
//! strings, `rgb(r, g, b)` functions, and color keywords used as paint
//! attribute or style-property values. Each occurrence counts as one
//! sample, so a color used on many elements weighs more than a one-off.
//!
//! Textual substitution of the matched colors is a separate collaborator;
//! this module only feeds the grouping step.

use std::sync::OnceLock;

use regex::Regex;

use super::cluster::{cluster_samples, Extraction};
use crate::color::Rgb;

fn hex_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("valid regex"))
}

fn rgb_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)")
            .expect("valid regex")
    })
}

fn keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Paint attributes (fill="red") and style properties (fill: red).
    RE.get_or_init(|| {
        Regex::new(
            r#"(?:fill|stroke|stop-color|flood-color|lighting-color|color)\s*[:=]\s*["']?([a-zA-Z]+)"#,
        )
        .expect("valid regex")
    })
}

/// Color keywords recognized in attribute and style values. The basic CSS
/// keyword set plus the extended names that show up in real exported SVGs.
/// Names not in this table (`none`, `inherit`, gradient references) simply
/// do not sample.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aqua", [0x00, 0xff, 0xff]),
    ("aquamarine", [0x7f, 0xff, 0xd4]),
    ("beige", [0xf5, 0xf5, 0xdc]),
    ("black", [0x00, 0x00, 0x00]),
    ("blue", [0x00, 0x00, 0xff]),
    ("brown", [0xa5, 0x2a, 0x2a]),
    ("cadetblue", [0x5f, 0x9e, 0xa0]),
    ("chartreuse", [0x7f, 0xff, 0x00]),
    ("chocolate", [0xd2, 0x69, 0x1e]),
    ("coral", [0xff, 0x7f, 0x50]),
    ("crimson", [0xdc, 0x14, 0x3c]),
    ("cyan", [0x00, 0xff, 0xff]),
    ("darkblue", [0x00, 0x00, 0x8b]),
    ("darkgray", [0xa9, 0xa9, 0xa9]),
    ("darkgreen", [0x00, 0x64, 0x00]),
    ("darkgrey", [0xa9, 0xa9, 0xa9]),
    ("darkred", [0x8b, 0x00, 0x00]),
    ("deeppink", [0xff, 0x14, 0x93]),
    ("dimgray", [0x69, 0x69, 0x69]),
    ("dimgrey", [0x69, 0x69, 0x69]),
    ("forestgreen", [0x22, 0x8b, 0x22]),
    ("fuchsia", [0xff, 0x00, 0xff]),
    ("gainsboro", [0xdc, 0xdc, 0xdc]),
    ("gold", [0xff, 0xd7, 0x00]),
    ("goldenrod", [0xda, 0xa5, 0x20]),
    ("gray", [0x80, 0x80, 0x80]),
    ("green", [0x00, 0x80, 0x00]),
    ("greenyellow", [0xad, 0xff, 0x2f]),
    ("grey", [0x80, 0x80, 0x80]),
    ("hotpink", [0xff, 0x69, 0xb4]),
    ("indigo", [0x4b, 0x00, 0x82]),
    ("ivory", [0xff, 0xff, 0xf0]),
    ("khaki", [0xf0, 0xe6, 0x8c]),
    ("lavender", [0xe6, 0xe6, 0xfa]),
    ("lightblue", [0xad, 0xd8, 0xe6]),
    ("lightgray", [0xd3, 0xd3, 0xd3]),
    ("lightgrey", [0xd3, 0xd3, 0xd3]),
    ("lime", [0x00, 0xff, 0x00]),
    ("linen", [0xfa, 0xf0, 0xe6]),
    ("magenta", [0xff, 0x00, 0xff]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("midnightblue", [0x19, 0x19, 0x70]),
    ("navy", [0x00, 0x00, 0x80]),
    ("olive", [0x80, 0x80, 0x00]),
    ("olivedrab", [0x6b, 0x8e, 0x23]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("orangered", [0xff, 0x45, 0x00]),
    ("orchid", [0xda, 0x70, 0xd6]),
    ("peru", [0xcd, 0x85, 0x3f]),
    ("pink", [0xff, 0xc0, 0xcb]),
    ("plum", [0xdd, 0xa0, 0xdd]),
    ("powderblue", [0xb0, 0xe0, 0xe6]),
    ("purple", [0x80, 0x00, 0x80]),
    ("rebeccapurple", [0x66, 0x33, 0x99]),
    ("red", [0xff, 0x00, 0x00]),
    ("royalblue", [0x41, 0x69, 0xe1]),
    ("salmon", [0xfa, 0x80, 0x72]),
    ("seagreen", [0x2e, 0x8b, 0x57]),
    ("sienna", [0xa0, 0x52, 0x2d]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("skyblue", [0x87, 0xce, 0xeb]),
    ("slategray", [0x70, 0x80, 0x90]),
    ("slategrey", [0x70, 0x80, 0x90]),
    ("snow", [0xff, 0xfa, 0xfa]),
    ("springgreen", [0x00, 0xff, 0x7f]),
    ("steelblue", [0x46, 0x82, 0xb4]),
    ("tan", [0xd2, 0xb4, 0x8c]),
    ("teal", [0x00, 0x80, 0x80]),
    ("tomato", [0xff, 0x63, 0x47]),
    ("turquoise", [0x40, 0xe0, 0xd0]),
    ("violet", [0xee, 0x82, 0xee]),
    ("wheat", [0xf5, 0xde, 0xb3]),
    ("white", [0xff, 0xff, 0xff]),
    ("whitesmoke", [0xf5, 0xf5, 0xf5]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("yellowgreen", [0x9a, 0xcd, 0x32]),
];

fn lookup_keyword(name: &str) -> Option<Rgb> {
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS
        .binary_search_by(|(k, _)| k.cmp(&lower.as_str()))
        .ok()
        .map(|i| Rgb::from_bytes(NAMED_COLORS[i].1))
}

/// Extract weighted color groups from markup text.
///
/// Every hex literal, `rgb(...)` literal, and recognized color keyword in
/// a paint attribute or style property counts as one sample. Inputs with
/// no color literals yield zero groups.
///
/// # Example
///
/// ```
/// use recolor::extract_groups_from_markup;
///
/// let svg = r##"<rect fill="#ff0000"/><circle fill="red" stroke="blue"/>"##;
/// let extraction = extract_groups_from_markup(svg, 10.0);
/// assert_eq!(extraction.total_samples, 3);
/// ```
pub fn extract_groups_from_markup(text: &str, distance_threshold: f32) -> Extraction {
    let mut freq: Vec<(Rgb, u32)> = Vec::new();
    let mut bump = |color: Rgb| {
        match freq.iter_mut().find(|(c, _)| *c == color) {
            Some((_, count)) => *count += 1,
            None => freq.push((color, 1)),
        }
    };

    for cap in hex_re().captures_iter(text) {
        if let Ok(color) = cap[0].parse::<Rgb>() {
            bump(color);
        }
    }

    for cap in rgb_fn_re().captures_iter(text) {
        let parse = |s: &str| s.parse::<u16>().ok().filter(|&v| v <= 255);
        if let (Some(r), Some(g), Some(b)) = (parse(&cap[1]), parse(&cap[2]), parse(&cap[3])) {
            bump(Rgb::new(r as u8, g as u8, b as u8));
        }
    }

    for cap in keyword_re().captures_iter(text) {
        if let Some(color) = lookup_keyword(&cap[1]) {
            bump(color);
        }
    }

    tracing::debug!(
        distinct = freq.len(),
        threshold = distance_threshold,
        "scanned markup for color literals"
    );

    cluster_samples(freq, distance_threshold)
}
