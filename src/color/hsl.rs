//! HSL color type and circular hue math
//!
//! HSL is used only for grouping and tint calculations. Pixels are never
//! stored in HSL form.

use super::rgb::Rgb;

/// A color in HSL space.
///
/// Hue is in degrees `[0, 360)`; saturation and lightness are percentages
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees (0..360)
    pub h: f32,
    /// Saturation in percent (0..=100)
    pub s: f32,
    /// Lightness in percent (0..=100)
    pub l: f32,
}

impl Hsl {
    /// Create a new HSL color. Hue is normalized into `[0, 360)`.
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self {
            h: normalize_hue(h),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }
}

/// Wrap a hue angle into `[0, 360)`.
#[inline]
pub(crate) fn normalize_hue(h: f32) -> f32 {
    let h = h % 360.0;
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r as f32 / 255.0;
        let g = rgb.g as f32 / 255.0;
        let b = rgb.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return Self { h: 0.0, s: 0.0, l: l * 100.0 };
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let h = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Self {
            h: normalize_hue(h * 60.0),
            s: s * 100.0,
            l: l * 100.0,
        }
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        let h = normalize_hue(hsl.h) / 360.0;
        let s = (hsl.s / 100.0).clamp(0.0, 1.0);
        let l = (hsl.l / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        let channel = |mut t: f32| -> u8 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        };

        Rgb::new(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
    }
}

/// Weighted circular mean of hue angles, in degrees `[0, 360)`.
///
/// Hues wrap at 360, so a plain arithmetic mean is wrong near the wrap
/// point (the mean of 350 and 10 is 0, not 180). Each hue is treated as a
/// unit vector scaled by its weight; the mean is the angle of the vector
/// sum. An all-zero sum (opposing hues cancelling out) yields 0.
pub fn circular_mean_hue(hues: &[(f32, f32)]) -> f32 {
    let mut x = 0.0f32;
    let mut y = 0.0f32;
    for &(hue, weight) in hues {
        let rad = hue.to_radians();
        x += rad.cos() * weight;
        y += rad.sin() * weight;
    }
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    normalize_hue(y.atan2(x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_hsl_primaries() {
        let red = Hsl::from(Rgb::new(255, 0, 0));
        assert_eq!(red.h, 0.0);
        assert!((red.s - 100.0).abs() < 1e-4);
        assert!((red.l - 50.0).abs() < 1e-4);

        let green = Hsl::from(Rgb::new(0, 255, 0));
        assert!((green.h - 120.0).abs() < 1e-3);

        let blue = Hsl::from(Rgb::new(0, 0, 255));
        assert!((blue.h - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_rgb_to_hsl_greys_have_zero_saturation() {
        for v in [0u8, 64, 128, 200, 255] {
            let hsl = Hsl::from(Rgb::new(v, v, v));
            assert_eq!(hsl.s, 0.0);
            assert_eq!(hsl.h, 0.0);
        }
    }

    #[test]
    fn test_hsl_round_trip() {
        // Round trip through HSL must be exact for every tested color
        // (one LSB of slack for the float math).
        for &rgb in &[
            Rgb::new(255, 0, 0),
            Rgb::new(12, 200, 99),
            Rgb::new(128, 128, 128),
            Rgb::new(1, 2, 3),
            Rgb::new(255, 254, 253),
        ] {
            let back = Rgb::from(Hsl::from(rgb));
            assert!(
                (back.r as i16 - rgb.r as i16).abs() <= 1
                    && (back.g as i16 - rgb.g as i16).abs() <= 1
                    && (back.b as i16 - rgb.b as i16).abs() <= 1,
                "round trip {:?} -> {:?}",
                rgb,
                back
            );
        }
    }

    #[test]
    fn test_circular_mean_wraps() {
        // 350 and 10 average to 0, not 180.
        let mean = circular_mean_hue(&[(350.0, 1.0), (10.0, 1.0)]);
        assert!(mean < 1.0 || mean > 359.0, "got {mean}");
    }

    #[test]
    fn test_circular_mean_weighted() {
        // Heavy weight pulls the mean toward its hue.
        let mean = circular_mean_hue(&[(0.0, 10.0), (90.0, 1.0)]);
        assert!(mean < 45.0, "got {mean}");
    }

    #[test]
    fn test_circular_mean_degenerate() {
        assert_eq!(circular_mean_hue(&[]), 0.0);
        // Exactly opposing hues cancel; defined result is 0.
        let mean = circular_mean_hue(&[(0.0, 1.0), (180.0, 1.0)]);
        assert!(mean.is_finite());
    }
}
