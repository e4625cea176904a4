use serde::Serialize;

use crate::error::{DigitError, Result};
use crate::math::matrix::Matrix;

/// Side length of the canonical image.
pub const CANONICAL_SIDE: usize = 28;
/// Number of pixels in the canonical image (the network's input width).
pub const CANONICAL_PIXELS: usize = CANONICAL_SIDE * CANONICAL_SIDE;

/// A 28×28 normalized, centered digit image, ready for the classifier.
///
/// Immutable once built; the only ways in are `normalize()` and
/// `from_pixels()`, both of which guarantee the shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalImage {
    grid: Matrix,
}

impl CanonicalImage {
    pub(crate) fn from_grid(grid: Matrix) -> Result<CanonicalImage> {
        if grid.shape() != (CANONICAL_SIDE, CANONICAL_SIDE) {
            return Err(DigitError::PaddingInvariant { rows: grid.rows(), cols: grid.cols() });
        }
        Ok(CanonicalImage { grid })
    }

    /// Wraps 784 row-major pixels that are already canonical.
    pub fn from_pixels(pixels: Vec<f64>) -> Result<CanonicalImage> {
        let grid = Matrix::from_vec(CANONICAL_SIDE, CANONICAL_SIDE, pixels)?;
        Ok(CanonicalImage { grid })
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.grid.get(row, col)
    }

    /// Row-major flattening, the classifier's 784-long input vector.
    pub fn as_slice(&self) -> &[f64] {
        self.grid.as_slice()
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.grid
    }

    /// Intensity-weighted (row, col) center of mass, `None` when blank.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        center_of_mass(&self.grid)
    }
}

/// Σ v·i / Σ v along each axis. `None` when the total mass is zero.
pub(crate) fn center_of_mass(grid: &Matrix) -> Option<(f64, f64)> {
    let mut total = 0.0;
    let mut row_moment = 0.0;
    let mut col_moment = 0.0;
    for i in 0..grid.rows() {
        for (j, &v) in grid.row(i).iter().enumerate() {
            total += v;
            row_moment += v * i as f64;
            col_moment += v * j as f64;
        }
    }
    if total == 0.0 {
        return None;
    }
    Some((row_moment / total, col_moment / total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pixels_requires_784_values() {
        assert!(CanonicalImage::from_pixels(vec![0.0; CANONICAL_PIXELS]).is_ok());
        assert!(CanonicalImage::from_pixels(vec![0.0; 783]).is_err());
    }

    #[test]
    fn from_grid_reports_padding_invariant() {
        let err = CanonicalImage::from_grid(Matrix::zeros(28, 27)).unwrap_err();
        assert!(matches!(err, DigitError::PaddingInvariant { rows: 28, cols: 27 }));
    }

    #[test]
    fn centroid_of_two_pixels() {
        let mut px = vec![0.0; CANONICAL_PIXELS];
        px[2 * CANONICAL_SIDE + 4] = 1.0;
        px[6 * CANONICAL_SIDE + 10] = 3.0;
        let img = CanonicalImage::from_pixels(px).unwrap();
        let (r, c) = img.centroid().unwrap();
        assert!((r - 5.0).abs() < 1e-12);
        assert!((c - 8.5).abs() < 1e-12);
    }

    #[test]
    fn blank_image_has_no_centroid() {
        let img = CanonicalImage::from_pixels(vec![0.0; CANONICAL_PIXELS]).unwrap();
        assert_eq!(img.centroid(), None);
    }
}
