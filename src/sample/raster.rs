//! Raster pixel sampling
//!
//! Stride-samples an RGBA pixel buffer so that the total number of samples
//! stays near [`TARGET_SAMPLES`] regardless of image size, then hands the
//! frequency table to the clusterer.

use std::collections::HashMap;

use thiserror::Error;

use super::cluster::{cluster_samples, Extraction};
use crate::color::Rgb;

/// Approximate number of pixels sampled from a raster source. The stride
/// is chosen as `max(1, pixel_count / TARGET_SAMPLES)`.
pub(crate) const TARGET_SAMPLES: usize = 50_000;

/// Error type for raster sampling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// Pixel buffer length does not match the stated dimensions.
    #[error(
        "pixel buffer length mismatch: expected {expected} bytes for \
         {width}x{height} RGBA, got {actual}"
    )]
    BufferShape {
        /// Stated image width in pixels
        width: usize,
        /// Stated image height in pixels
        height: usize,
        /// `width * height * 4`
        expected: usize,
        /// Actual buffer length in bytes
        actual: usize,
    },
}

/// Extract weighted color groups from an RGBA pixel buffer.
///
/// `distance_threshold` controls grouping tightness (Euclidean RGB
/// distance between a candidate color and a group's first-inserted
/// member). Looser thresholds suit photographic sources; tighter ones
/// suit flat vector renders.
///
/// Fully transparent pixels are not sampled. An image with zero opaque
/// pixels yields zero groups, which is a valid state rather than an error.
///
/// # Errors
///
/// [`SampleError::BufferShape`] if `pixels.len() != width * height * 4`.
///
/// # Example
///
/// ```
/// use recolor::extract_groups;
///
/// // 2x1 image: one red pixel, one blue pixel
/// let pixels = [255, 0, 0, 255, 0, 0, 255, 255];
/// let extraction = extract_groups(&pixels, 2, 1, 45.0).unwrap();
/// assert_eq!(extraction.groups.len(), 2);
/// assert_eq!(extraction.total_samples, 2);
/// ```
pub fn extract_groups(
    pixels: &[u8],
    width: usize,
    height: usize,
    distance_threshold: f32,
) -> Result<Extraction, SampleError> {
    let pixel_count = width * height;
    let expected = pixel_count * 4;
    if pixels.len() != expected {
        return Err(SampleError::BufferShape {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    let stride = (pixel_count / TARGET_SAMPLES).max(1);
    let mut freq: HashMap<Rgb, u32> = HashMap::new();

    for i in (0..pixel_count).step_by(stride) {
        let at = i * 4;
        if pixels[at + 3] == 0 {
            continue;
        }
        let color = Rgb::new(pixels[at], pixels[at + 1], pixels[at + 2]);
        *freq.entry(color).or_insert(0) += 1;
    }

    tracing::debug!(
        distinct = freq.len(),
        stride,
        threshold = distance_threshold,
        "sampled raster pixels"
    );

    Ok(cluster_samples(freq.into_iter().collect(), distance_threshold))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an RGBA buffer from per-pixel `[r, g, b, a]` values.
    fn image(pixels: &[[u8; 4]]) -> Vec<u8> {
        pixels.iter().flatten().copied().collect()
    }

    #[test]
    fn test_buffer_shape_error() {
        let err = extract_groups(&[0u8; 7], 2, 1, 45.0).unwrap_err();
        assert_eq!(
            err,
            SampleError::BufferShape {
                width: 2,
                height: 1,
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_empty_image_yields_zero_groups() {
        let out = extract_groups(&[], 0, 0, 45.0).unwrap();
        assert!(out.groups.is_empty());
        assert_eq!(out.total_samples, 0);
    }

    #[test]
    fn test_transparent_pixels_are_skipped() {
        let buf = image(&[[255, 0, 0, 255], [0, 255, 0, 0]]);
        let out = extract_groups(&buf, 2, 1, 10.0).unwrap();
        assert_eq!(out.total_samples, 1);
        assert_eq!(out.groups.len(), 1);
        assert_eq!(out.groups[0].members[0].color, Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_small_image_samples_every_pixel() {
        let buf = image(&[
            [255, 0, 0, 255],
            [255, 0, 0, 255],
            [0, 0, 255, 255],
            [0, 0, 255, 255],
        ]);
        let out = extract_groups(&buf, 2, 2, 45.0).unwrap();
        assert_eq!(out.total_samples, 4);
        assert_eq!(out.groups.len(), 2);
    }

    #[test]
    fn test_sampling_is_deterministic() {
        // HashMap iteration order varies between runs; clustering must not.
        let buf: Vec<u8> = (0..64 * 64)
            .flat_map(|i| {
                let v = (i % 7 * 30) as u8;
                [v, v / 2, 255 - v, 255]
            })
            .collect();
        let a = extract_groups(&buf, 64, 64, 45.0).unwrap();
        let b = extract_groups(&buf, 64, 64, 45.0).unwrap();
        assert_eq!(a, b);
    }
}
