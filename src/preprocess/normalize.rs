use crate::error::{DigitError, Result};
use crate::math::matrix::Matrix;
use crate::preprocess::canonical::{center_of_mass, CanonicalImage, CANONICAL_SIDE};
use crate::preprocess::mask::RawMask;
use crate::preprocess::resize::resize_bilinear;

/// Length of the long side after rescaling; the rest of the 28 is padding.
pub const FIT_SIDE: usize = 20;

/// Turns a raw stroke mask into the canonical 28×28 image the network was
/// trained on: trim empty borders, rescale the long side to 20, pad to 28×28,
/// then shift so the intensity centroid sits on the center pixel.
///
/// Fails with `InputEmpty` when nothing was drawn.
pub fn normalize(mask: &RawMask) -> Result<CanonicalImage> {
    if mask.sum() == 0.0 {
        return Err(DigitError::InputEmpty);
    }

    let trimmed = trim(mask.as_matrix())?;
    let (rows, cols) = fitted_shape(trimmed.rows(), trimmed.cols());
    let resized = resize_bilinear(&trimmed, rows, cols);
    let padded = pad(&resized)?;

    let shifted = match center_of_mass(&padded) {
        Some((cy, cx)) => {
            let center = CANONICAL_SIDE as f64 / 2.0;
            let dx = (center - cx).round_ties_even() as isize;
            let dy = (center - cy).round_ties_even() as isize;
            tracing::debug!(
                trimmed = ?trimmed.shape(), resized = ?(rows, cols), cy, cx, dy, dx,
                "normalized mask geometry"
            );
            translate(&padded, dy, dx)
        }
        None => padded,
    };

    CanonicalImage::from_grid(shifted)
}

/// Inclusive-exclusive window `[top, bottom) × [left, right)` into a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    top: usize,
    bottom: usize,
    left: usize,
    right: usize,
}

impl Window {
    fn row_sum(&self, grid: &Matrix, i: usize) -> f64 {
        grid.row(i)[self.left..self.right].iter().sum()
    }

    fn col_sum(&self, grid: &Matrix, j: usize) -> f64 {
        (self.top..self.bottom).map(|i| grid.get(i, j)).sum()
    }

    fn is_empty(&self) -> bool {
        self.top >= self.bottom || self.left >= self.right
    }
}

/// Strips zero-sum edges in a fixed order: all leading rows, then leading
/// columns, then trailing rows, then trailing columns. Each edge's sums are
/// taken over what the earlier edges left behind.
fn trim(grid: &Matrix) -> Result<Matrix> {
    let mut w = Window { top: 0, bottom: grid.rows(), left: 0, right: grid.cols() };

    while w.top < w.bottom && w.row_sum(grid, w.top) == 0.0 {
        w.top += 1;
    }
    while w.left < w.right && w.col_sum(grid, w.left) == 0.0 {
        w.left += 1;
    }
    while w.top < w.bottom && w.row_sum(grid, w.bottom - 1) == 0.0 {
        w.bottom -= 1;
    }
    while w.left < w.right && w.col_sum(grid, w.right - 1) == 0.0 {
        w.right -= 1;
    }

    if w.is_empty() {
        return Err(DigitError::InputEmpty);
    }

    let mut out = Matrix::zeros(w.bottom - w.top, w.right - w.left);
    for i in w.top..w.bottom {
        for j in w.left..w.right {
            out.set(i - w.top, j - w.left, grid.get(i, j));
        }
    }
    Ok(out)
}

/// Target shape with the long side at `FIT_SIDE` and the aspect ratio kept.
/// Ties (square input) scale by columns. The short side never drops below 1.
fn fitted_shape(rows: usize, cols: usize) -> (usize, usize) {
    let short = |short_side: usize, long_side: usize| {
        let factor = FIT_SIDE as f64 / long_side as f64;
        ((short_side as f64 * factor).round_ties_even() as usize).max(1)
    };
    if rows > cols {
        (FIT_SIDE, short(cols, rows))
    } else {
        (short(rows, cols), FIT_SIDE)
    }
}

/// Splits `CANONICAL_SIDE - size` into (before, after), the odd pixel going
/// before.
fn padding(size: usize) -> Result<(usize, usize)> {
    let total = CANONICAL_SIDE.checked_sub(size).ok_or(DigitError::PaddingInvariant {
        rows: size,
        cols: size,
    })?;
    Ok((total - total / 2, total / 2))
}

fn pad(img: &Matrix) -> Result<Matrix> {
    let (rows_before, rows_after) = padding(img.rows()).map_err(|_| padding_error(img))?;
    let (cols_before, cols_after) = padding(img.cols()).map_err(|_| padding_error(img))?;

    let out_rows = rows_before + img.rows() + rows_after;
    let out_cols = cols_before + img.cols() + cols_after;
    if (out_rows, out_cols) != (CANONICAL_SIDE, CANONICAL_SIDE) {
        return Err(DigitError::PaddingInvariant { rows: out_rows, cols: out_cols });
    }

    let mut out = Matrix::zeros(out_rows, out_cols);
    for i in 0..img.rows() {
        for j in 0..img.cols() {
            out.set(i + rows_before, j + cols_before, img.get(i, j));
        }
    }
    Ok(out)
}

fn padding_error(img: &Matrix) -> DigitError {
    DigitError::PaddingInvariant { rows: img.rows(), cols: img.cols() }
}

/// Integer translation by (dy, dx) with zero fill; the output keeps the
/// input's shape and content moved off the canvas is dropped.
fn translate(img: &Matrix, dy: isize, dx: isize) -> Matrix {
    let (rows, cols) = img.shape();
    let mut out = Matrix::zeros(rows, cols);
    for i in 0..rows {
        let src_i = i as isize - dy;
        if src_i < 0 || src_i >= rows as isize {
            continue;
        }
        for j in 0..cols {
            let src_j = j as isize - dx;
            if src_j < 0 || src_j >= cols as isize {
                continue;
            }
            out.set(i, j, img.get(src_i as usize, src_j as usize));
        }
    }
    out
}
