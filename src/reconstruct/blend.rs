//! Blend ratio computation and shaping
//!
//! Once a blend pair is chosen, the resampled pixel color is projected
//! onto the segment between the two match colors, yielding a ratio `t`.
//! A series of shaping passes then snaps orphans, removes blips, applies
//! a deadzone near the anchor and remaps the remainder through a
//! normalized logistic curve whose steepness follows the smoothing
//! intensity.

use crate::palette::table::dist_sq;

/// Fraction of the segment near either end where an implausible pixel is
/// treated as an orphan and snapped, scaled down as smoothing rises.
const ORPHAN_FRINGE: f32 = 0.4;

/// A resampled neighbor closer than this to the segment midpoint makes a
/// fringe pixel plausible (a real gradient is passing through).
const MIDPOINT_PLAUSIBLE_DIST: f32 = 120.0;

/// Blips are tiny excursions from the anchor: ratio under this bound.
const BLIP_MAX_T: f32 = 0.25;

/// Blip distance bound as a fraction of the squared segment length.
const BLIP_ANCHOR_FRACTION: f32 = 0.05;

/// Deadzone half-width near the anchor at zero smoothing; it narrows to
/// zero at full smoothing.
const DEADZONE: f32 = 0.15;

/// Logistic steepness at zero smoothing (hard edges).
const SIGMOID_STEEP: f32 = 28.0;

/// Logistic steepness at full smoothing (gentle ramps).
const SIGMOID_GENTLE: f32 = 8.0;

/// Scalar projection of `px` onto the segment `a..b`, clamped to `[0, 1]`.
/// A degenerate segment projects to 0 (stay on the anchor).
pub(crate) fn project_t(px: [f32; 3], a: [f32; 3], b: [f32; 3]) -> f32 {
    let seg_len_sq = dist_sq(a, b);
    if seg_len_sq <= f32::EPSILON {
        return 0.0;
    }
    let mut dot = 0.0;
    for i in 0..3 {
        dot += (px[i] - a[i]) * (b[i] - a[i]);
    }
    (dot / seg_len_sq).clamp(0.0, 1.0)
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Remap `t` through a logistic curve centered at 0.5, renormalized so
/// that 0 maps to 0 and 1 maps to 1 exactly.
fn remap_sigmoid(t: f32, k: f32) -> f32 {
    let lo = sigmoid(-k * 0.5);
    let hi = sigmoid(k * 0.5);
    (sigmoid(k * (t - 0.5)) - lo) / (hi - lo)
}

/// Shape a raw projection ratio into the final blend ratio.
///
/// `intensity` is the smoothing level normalized to `[0, 1]`.
/// `neighbor_near_midpoint` reports whether any resampled neighbor of the
/// output pixel sits near the segment midpoint; it is only consulted for
/// fringe pixels.
pub(crate) fn shape_t(
    t: f32,
    px: [f32; 3],
    a: [f32; 3],
    b: [f32; 3],
    intensity: f32,
    neighbor_near_midpoint: impl FnOnce([f32; 3]) -> bool,
) -> f32 {
    let mut t = t;

    // Orphan snap: a pixel near either end whose neighborhood shows no
    // trace of the segment midpoint is a stray, not part of a gradient.
    let fringe = ORPHAN_FRINGE * (1.0 - intensity / 2.0);
    if (t < fringe || t > 1.0 - fringe) && t != 0.0 && t != 1.0 {
        let mid = [
            (a[0] + b[0]) * 0.5,
            (a[1] + b[1]) * 0.5,
            (a[2] + b[2]) * 0.5,
        ];
        if !neighbor_near_midpoint(mid) {
            t = if t < 0.5 { 0.0 } else { 1.0 };
        }
    }

    // Blip removal: a barely-started blend whose color is still right on
    // top of the anchor is sensor or resampling noise.
    if t > 0.0 && t < BLIP_MAX_T && dist_sq(px, a) < BLIP_ANCHOR_FRACTION * dist_sq(a, b) {
        t = 0.0;
    }

    // Deadzone near the anchor keeps flat regions exactly flat.
    let dz = DEADZONE * (1.0 - intensity);
    if t < dz {
        t = 0.0;
    } else if t > 1.0 - dz {
        t = 1.0;
    }

    let k = SIGMOID_STEEP * (1.0 - intensity) + SIGMOID_GENTLE * intensity;
    remap_sigmoid(t, k)
}

/// True if `sample` lies within the midpoint plausibility radius of `mid`.
pub(crate) fn near_midpoint(sample: [f32; 3], mid: [f32; 3]) -> bool {
    dist_sq(sample, mid) < MIDPOINT_PLAUSIBLE_DIST * MIDPOINT_PLAUSIBLE_DIST
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 3] = [255.0, 0.0, 0.0];
    const BLUE: [f32; 3] = [0.0, 0.0, 255.0];

    #[test]
    fn test_project_endpoints_and_midpoint() {
        assert_eq!(project_t(RED, RED, BLUE), 0.0);
        assert_eq!(project_t(BLUE, RED, BLUE), 1.0);
        let mid = [127.5, 0.0, 127.5];
        assert!((project_t(mid, RED, BLUE) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_project_degenerate_segment() {
        assert_eq!(project_t(BLUE, RED, RED), 0.0);
    }

    #[test]
    fn test_project_clamps_overshoot() {
        // A color past the far endpoint still projects to 1.
        let beyond = [-50.0, 0.0, 305.0];
        assert_eq!(project_t(beyond, RED, BLUE), 1.0);
    }

    #[test]
    fn test_remap_fixes_endpoints() {
        for &k in &[8.0, 20.0, 28.0] {
            assert!(remap_sigmoid(0.0, k).abs() < 1e-6);
            assert!((remap_sigmoid(1.0, k) - 1.0).abs() < 1e-6);
            assert!((remap_sigmoid(0.5, k) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_remap_is_monotonic() {
        let k = 28.0;
        let mut prev = -1.0;
        for i in 0..=20 {
            let v = remap_sigmoid(i as f32 / 20.0, k);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_orphan_snaps_without_midpoint_support() {
        // t = 0.3 clears both the blip bound and the deadzone; only the
        // orphan snap can zero it.
        let px = [178.5, 0.0, 76.5];
        let t = shape_t(0.3, px, RED, BLUE, 0.0, |_| false);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_orphan_kept_with_midpoint_support() {
        // t = 0.3: past the blip bound, past the deadzone, inside the
        // fringe. A supporting neighbor keeps the blend alive.
        let px = [178.5, 0.0, 76.5];
        let t = shape_t(0.3, px, RED, BLUE, 0.0, |_| true);
        assert!(t > 0.0);
    }

    #[test]
    fn test_blip_removed() {
        // Ratio just above zero but the color still sits on the anchor.
        let px = [254.0, 0.0, 1.0];
        let t = shape_t(0.05, px, RED, BLUE, 0.0, |_| true);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_deadzone_narrows_with_smoothing() {
        let px = [229.5, 0.0, 25.5];
        // t = 0.1 is inside the zero-smoothing deadzone (0.15) but
        // outside the full-smoothing one (0.0).
        assert_eq!(shape_t(0.1, px, RED, BLUE, 0.0, |_| true), 0.0);
        assert!(shape_t(0.1, px, RED, BLUE, 1.0, |_| true) > 0.0);
    }

    #[test]
    fn test_steep_curve_pushes_midrange_outward() {
        let px = [178.5, 0.0, 76.5];
        let hard = shape_t(0.3, px, RED, BLUE, 0.0, |_| true);
        let soft = shape_t(0.3, px, RED, BLUE, 1.0, |_| true);
        // The steep curve flattens values below the center toward 0
        // harder than the gentle curve does.
        assert!(hard < soft);
    }
}
