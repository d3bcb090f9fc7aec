//! Force-weighted HSL tinting
//!
//! A tint is a secondary transform applied to a group's member colors at
//! output time. It never mutates stored colors. The transform is anchored
//! to the group's circular-mean base hue: a member's hue offset from the
//! base is preserved while the base itself is steered toward the tint hue.

use serde::{Deserialize, Serialize};

use super::hsl::{normalize_hue, Hsl};
use super::rgb::Rgb;

/// Settings for a force-weighted HSL tint.
///
/// `hue`, `saturation` and `lightness` are the target values; the matching
/// `*_force` fields (0..=100) control how strongly each channel is pulled
/// toward its target. A force of 0 leaves the channel untouched, 100
/// replaces it outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TintSettings {
    /// Target hue in degrees (0..360)
    pub hue: f32,
    /// Target saturation in percent (0..=100)
    pub saturation: f32,
    /// Target lightness in percent (0..=100)
    pub lightness: f32,
    /// Hue pull strength (0..=100)
    pub hue_force: f32,
    /// Saturation pull strength (0..=100)
    pub saturation_force: f32,
    /// Lightness pull strength (0..=100)
    pub lightness_force: f32,
}

impl Default for TintSettings {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 50.0,
            lightness: 50.0,
            hue_force: 0.0,
            saturation_force: 0.0,
            lightness_force: 0.0,
        }
    }
}

/// Shortest signed angular difference `a - b`, in `(-180, 180]`.
#[inline]
fn signed_hue_delta(a: f32, b: f32) -> f32 {
    let mut d = normalize_hue(a) - normalize_hue(b);
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Apply a tint to one member color, anchored to its group's base hue.
///
/// The member's hue offset from `base_hue` is preserved: the tint steers
/// the *base* hue toward `tint.hue`, and the member follows at the same
/// relative offset. Saturation and lightness are pulled linearly toward
/// their targets by their respective forces.
pub fn apply_tint(color: Rgb, base_hue: f32, tint: &TintSettings) -> Rgb {
    let hue_t = (tint.hue_force / 100.0).clamp(0.0, 1.0);
    let sat_t = (tint.saturation_force / 100.0).clamp(0.0, 1.0);
    let light_t = (tint.lightness_force / 100.0).clamp(0.0, 1.0);
    if hue_t == 0.0 && sat_t == 0.0 && light_t == 0.0 {
        // All forces at rest: skip the HSL round trip entirely so stored
        // colors pass through byte-exact.
        return color;
    }

    let hsl = Hsl::from(color);

    // Member hue relative to the group anchor, carried over to the target.
    let offset = signed_hue_delta(hsl.h, base_hue);
    let target_h = tint.hue + offset;
    let h = normalize_hue(hsl.h + signed_hue_delta(target_h, hsl.h) * hue_t);

    let s = hsl.s + (tint.saturation.clamp(0.0, 100.0) - hsl.s) * sat_t;
    let l = hsl.l + (tint.lightness.clamp(0.0, 100.0) - hsl.l) * light_t;

    Rgb::from(Hsl::new(h, s, l))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_force_is_identity() {
        let tint = TintSettings::default();
        for &c in &[Rgb::new(200, 30, 30), Rgb::new(0, 0, 0), Rgb::new(10, 250, 99)] {
            assert_eq!(apply_tint(c, 0.0, &tint), c);
        }
    }

    #[test]
    fn test_full_hue_force_moves_base_to_target() {
        // A member sitting exactly on the base hue lands exactly on the
        // tint hue under full force.
        let red = Rgb::new(255, 0, 0); // hue 0
        let tint = TintSettings {
            hue: 120.0,
            hue_force: 100.0,
            ..TintSettings::default()
        };
        let out = Hsl::from(apply_tint(red, 0.0, &tint));
        assert!((out.h - 120.0).abs() < 2.0, "got hue {}", out.h);
    }

    #[test]
    fn test_hue_offset_from_base_is_preserved() {
        // Member 30 degrees off the base keeps that offset after a full
        // pull to the target hue.
        let member = Rgb::from(Hsl::new(30.0, 80.0, 50.0));
        let tint = TintSettings {
            hue: 200.0,
            hue_force: 100.0,
            ..TintSettings::default()
        };
        let out = Hsl::from(apply_tint(member, 0.0, &tint));
        assert!((out.h - 230.0).abs() < 2.0, "got hue {}", out.h);
    }

    #[test]
    fn test_partial_saturation_force() {
        let c = Rgb::from(Hsl::new(0.0, 100.0, 50.0));
        let tint = TintSettings {
            saturation: 0.0,
            saturation_force: 50.0,
            ..TintSettings::default()
        };
        let out = Hsl::from(apply_tint(c, 0.0, &tint));
        assert!((out.s - 50.0).abs() < 2.0, "got saturation {}", out.s);
    }

    #[test]
    fn test_lightness_force_full() {
        let c = Rgb::new(10, 10, 10);
        let tint = TintSettings {
            lightness: 100.0,
            lightness_force: 100.0,
            ..TintSettings::default()
        };
        assert_eq!(apply_tint(c, 0.0, &tint), Rgb::new(255, 255, 255));
    }
}
