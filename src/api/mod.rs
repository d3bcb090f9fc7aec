//! Public pipeline API
//!
//! [`Recolorer`] is the one-stop entry point: configure it with a palette
//! and tuning knobs, then feed it the native buffer and the resampled
//! output buffer. The low-level stage functions
//! ([`solve_labels`](crate::solve_labels),
//! [`reconstruct`](crate::reconstruct)) remain available for callers that
//! want to reuse a label field across parameter changes.

mod builder;
mod error;

pub use builder::Recolorer;
pub use error::RecolorError;

/// Hard ceiling on the pixel count of any buffer entering the pipeline.
///
/// The solver and reconstructor hold a handful of full-size scratch
/// buffers at once; past this point memory use becomes a liability and
/// callers are expected to downscale first.
pub const MAX_PIPELINE_PIXELS: usize = 10_000_000;

/// Scale dimensions down (preserving aspect ratio) until the pixel count
/// fits under [`MAX_PIPELINE_PIXELS`]. Dimensions already under the
/// ceiling come back unchanged.
pub fn fit_within_budget(width: usize, height: usize) -> (usize, usize) {
    let pixels = width * height;
    if pixels <= MAX_PIPELINE_PIXELS {
        return (width, height);
    }
    let scale = (MAX_PIPELINE_PIXELS as f64 / pixels as f64).sqrt();
    let w = ((width as f64 * scale).floor() as usize).max(1);
    let h = ((height as f64 * scale).floor() as usize).max(1);
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_dimensions_unchanged() {
        assert_eq!(fit_within_budget(1920, 1080), (1920, 1080));
        assert_eq!(fit_within_budget(0, 0), (0, 0));
    }

    #[test]
    fn test_oversized_dimensions_scaled_down() {
        let (w, h) = fit_within_budget(8000, 6000);
        assert!(w * h <= MAX_PIPELINE_PIXELS);
        // Aspect ratio survives within a pixel of rounding.
        let ratio = w as f64 / h as f64;
        assert!((ratio - 8000.0 / 6000.0).abs() < 0.01);
    }

    #[test]
    fn test_degenerate_strip_keeps_min_dimension() {
        let (w, h) = fit_within_budget(100_000_000, 1);
        assert!(w >= 1 && h >= 1);
        assert!(w * h <= MAX_PIPELINE_PIXELS);
    }
}
