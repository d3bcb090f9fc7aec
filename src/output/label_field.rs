//! Label field: the solver's per-pixel palette assignment

use crate::api::RecolorError;

/// A grid mapping each native pixel to a match-palette index.
///
/// Row-major, one `u32` label per pixel. Construction validates that the
/// buffer length matches the stated dimensions; there is no unchecked
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelField {
    labels: Vec<u32>,
    width: usize,
    height: usize,
}

impl LabelField {
    /// Wrap a label buffer, validating its shape.
    ///
    /// # Errors
    ///
    /// [`RecolorError::LabelShape`] if `labels.len() != width * height`.
    pub fn new(labels: Vec<u32>, width: usize, height: usize) -> Result<Self, RecolorError> {
        let expected = width * height;
        if labels.len() != expected {
            return Err(RecolorError::LabelShape {
                width,
                height,
                expected,
                actual: labels.len(),
            });
        }
        Ok(Self {
            labels,
            width,
            height,
        })
    }

    /// All labels, row-major.
    #[inline]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Field width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Label at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.labels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_validated() {
        assert!(LabelField::new(vec![0; 6], 3, 2).is_ok());
        let err = LabelField::new(vec![0; 5], 3, 2).unwrap_err();
        assert_eq!(
            err,
            RecolorError::LabelShape {
                width: 3,
                height: 2,
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_row_major_access() {
        let field = LabelField::new(vec![0, 1, 2, 3, 4, 5], 3, 2).unwrap();
        assert_eq!(field.get(0, 0), 0);
        assert_eq!(field.get(2, 0), 2);
        assert_eq!(field.get(0, 1), 3);
        assert_eq!(field.get(2, 1), 5);
    }
}
