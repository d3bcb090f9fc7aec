//! Unified error type for the recolor public API.

use thiserror::Error;

use crate::sample::SampleError;

/// Unified error type for the recolor public API.
///
/// Degenerate *data* (zero groups, an empty palette at the builder level)
/// is not an error -- the high-level API signals "no recoloring" instead.
/// These variants cover genuine misuse: buffer shapes that contradict the
/// stated dimensions, and inputs over the pipeline's memory ceiling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecolorError {
    /// Pixel buffer length does not match the stated dimensions.
    #[error(
        "pixel buffer length mismatch: expected {expected} bytes for \
         {width}x{height} RGBA, got {actual}"
    )]
    BufferShape {
        /// Stated width in pixels
        width: usize,
        /// Stated height in pixels
        height: usize,
        /// `width * height * 4`
        expected: usize,
        /// Actual buffer length in bytes
        actual: usize,
    },

    /// Label buffer length does not match the stated dimensions.
    #[error(
        "label field length mismatch: expected {expected} labels for \
         {width}x{height}, got {actual}"
    )]
    LabelShape {
        /// Stated width in pixels
        width: usize,
        /// Stated height in pixels
        height: usize,
        /// `width * height`
        expected: usize,
        /// Actual label count
        actual: usize,
    },

    /// The match palette has no entries. Raised only by the low-level
    /// solver/reconstructor entry points; [`Recolorer`](crate::Recolorer)
    /// treats an empty palette as the graceful "no recoloring" path.
    #[error("match palette is empty")]
    EmptyPalette,

    /// Input exceeds the pipeline pixel-count ceiling. Downscale the
    /// buffers first (see [`fit_within_budget`](crate::fit_within_budget)).
    #[error("image too large: {pixels} pixels (max {max}); downscale before recoloring")]
    TooLarge {
        /// Pixel count of the offending buffer
        pixels: usize,
        /// The ceiling
        max: usize,
    },

    /// Sampling error from group extraction.
    #[error(transparent)]
    Sample(#[from] SampleError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RecolorError::BufferShape {
            width: 2,
            height: 2,
            expected: 16,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "pixel buffer length mismatch: expected 16 bytes for 2x2 RGBA, got 12"
        );

        let err = RecolorError::EmptyPalette;
        assert_eq!(err.to_string(), "match palette is empty");
    }

    #[test]
    fn test_sample_error_converts() {
        let sample = SampleError::BufferShape {
            width: 1,
            height: 1,
            expected: 4,
            actual: 3,
        };
        let err: RecolorError = sample.clone().into();
        assert_eq!(err, RecolorError::Sample(sample));
    }
}
