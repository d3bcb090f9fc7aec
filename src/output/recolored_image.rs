//! Recolored image: the reconstructor's RGBA output

/// The canonical output of the reconstruction phase.
///
/// Stores opaque RGBA bytes (alpha is always 255) in row-major order at
/// the output resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoloredImage {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl RecoloredImage {
    /// Wrap an RGBA buffer produced by the reconstructor.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `pixels.len() == width * height * 4`.
    pub(crate) fn new(pixels: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width * height * 4,
            "pixel buffer length ({}) must match {}x{} RGBA ({})",
            pixels.len(),
            width,
            height,
            width * height * 4,
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// The RGBA bytes, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image, returning the RGBA buffer.
    #[inline]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The `[r, g, b, a]` value at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let at = (y * self.width + x) * 4;
        [
            self.pixels[at],
            self.pixels[at + 1],
            self.pixels[at + 2],
            self.pixels[at + 3],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_access() {
        let img = RecoloredImage::new(vec![1, 2, 3, 255, 4, 5, 6, 255], 2, 1);
        assert_eq!(img.pixel(0, 0), [1, 2, 3, 255]);
        assert_eq!(img.pixel(1, 0), [4, 5, 6, 255]);
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 1);
    }
}
