//! Bilinear resampling with the conventions of OpenCV's `INTER_LINEAR` on
//! floating-point images, which the trained network's preprocessing used:
//!
//! - destination pixel centers map back with `src = (dst + 0.5) * scale - 0.5`;
//! - the fractional offset and the two interpolation weights are single
//!   precision, the accumulation is double precision;
//! - samples left of the first or right of the last source pixel collapse onto
//!   that edge pixel;
//! - an exact 2× reduction on both axes switches to 2×2 box averaging.

use crate::math::matrix::Matrix;

/// Source index and weights for one destination coordinate.
#[derive(Debug, Clone, Copy)]
struct Tap {
    index: usize,
    /// Weight of `index`; `1 - w1`.
    w0: f32,
    /// Weight of `index + 1`. Zero at the edges, where only `index` is read.
    w1: f32,
    clamped: bool,
}

fn taps(src_len: usize, dst_len: usize) -> Vec<Tap> {
    let scale = 1.0 / (dst_len as f64 / src_len as f64);
    (0..dst_len)
        .map(|d| {
            let mut f = ((d as f64 + 0.5) * scale - 0.5) as f32;
            let mut s = f.floor() as isize;
            f -= s as f32;
            let mut clamped = false;
            if s < 0 {
                f = 0.0;
                s = 0;
                clamped = true;
            }
            if s + 1 >= src_len as isize {
                clamped = true;
                if s >= src_len as isize - 1 {
                    f = 0.0;
                    s = src_len as isize - 1;
                }
            }
            Tap { index: s as usize, w0: 1.0 - f, w1: f, clamped }
        })
        .collect()
}

fn is_exact_halving(src_len: usize, dst_len: usize) -> bool {
    let scale = 1.0 / (dst_len as f64 / src_len as f64);
    (scale - 2.0).abs() < f64::EPSILON
}

/// Resizes `src` to `dst_rows × dst_cols`. Both target sides must be ≥ 1 and
/// `src` must be non-empty.
pub fn resize_bilinear(src: &Matrix, dst_rows: usize, dst_cols: usize) -> Matrix {
    if src.shape() == (dst_rows, dst_cols) {
        return src.clone();
    }
    if is_exact_halving(src.rows(), dst_rows) && is_exact_halving(src.cols(), dst_cols) {
        return halve(src, dst_rows, dst_cols);
    }

    let xs = taps(src.cols(), dst_cols);
    let ys = taps(src.rows(), dst_rows);

    // Horizontal pass over every source row, then blend rows vertically.
    let horizontal: Vec<Vec<f64>> = (0..src.rows())
        .map(|i| {
            let row = src.row(i);
            xs.iter()
                .map(|t| {
                    if t.clamped {
                        row[t.index]
                    } else {
                        row[t.index] * t.w0 as f64 + row[t.index + 1] * t.w1 as f64
                    }
                })
                .collect()
        })
        .collect();

    let mut out = Matrix::zeros(dst_rows, dst_cols);
    let last = src.rows() - 1;
    for (i, t) in ys.iter().enumerate() {
        let r0 = &horizontal[t.index];
        let r1 = &horizontal[(t.index + 1).min(last)];
        for j in 0..dst_cols {
            out.set(i, j, r0[j] * t.w0 as f64 + r1[j] * t.w1 as f64);
        }
    }
    out
}

fn halve(src: &Matrix, dst_rows: usize, dst_cols: usize) -> Matrix {
    let mut out = Matrix::zeros(dst_rows, dst_cols);
    for i in 0..dst_rows {
        for j in 0..dst_cols {
            let (r, c) = (2 * i, 2 * j);
            let sum = src.get(r, c) + src.get(r, c + 1) + src.get(r + 1, c) + src.get(r + 1, c + 1);
            out.set(i, j, sum * 0.25);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }

    #[test]
    fn same_size_is_a_copy() {
        let m = Matrix::from_rows(&[vec![0.1, 0.2], vec![0.3, 0.4]]).unwrap();
        assert_eq!(resize_bilinear(&m, 2, 2), m);
    }

    #[test]
    fn constant_input_stays_constant() {
        let m = Matrix::from_vec(4, 3, vec![0.75; 12]).unwrap();
        let out = resize_bilinear(&m, 20, 15);
        assert_eq!(out.shape(), (20, 15));
        for &v in out.as_slice() {
            assert_close(v, 0.75);
        }
    }

    #[test]
    fn single_pixel_fills_the_target() {
        let m = Matrix::from_vec(1, 1, vec![1.0]).unwrap();
        let out = resize_bilinear(&m, 20, 20);
        assert!(out.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn upsampling_a_ramp_uses_half_pixel_centers() {
        // 2 → 4: src positions -0.25, 0.25, 0.75, 1.25
        let m = Matrix::from_rows(&[vec![0.0, 1.0]]).unwrap();
        let out = resize_bilinear(&m, 1, 4);
        let got = out.row(0);
        assert_close(got[0], 0.0);
        assert_close(got[1], 0.25);
        assert_close(got[2], 0.75);
        assert_close(got[3], 1.0);
    }

    #[test]
    fn downsampling_three_to_two() {
        // 3 → 2: scale 1.5, src positions 0.25 and 1.75
        let m = Matrix::from_rows(&[vec![0.0, 1.0, 0.0]]).unwrap();
        let out = resize_bilinear(&m, 1, 2);
        assert_close(out.get(0, 0), 0.25);
        assert_close(out.get(0, 1), 0.25);
    }

    #[test]
    fn exact_halving_averages_blocks() {
        let m = Matrix::from_rows(&[
            vec![1.0, 0.0, 0.0, 0.0],
            vec![1.0, 1.0, 0.0, 0.0],
        ])
        .unwrap();
        let out = resize_bilinear(&m, 1, 2);
        assert_eq!(out.as_slice(), &[0.75, 0.0]);
    }

    #[test]
    fn single_row_source_grows_vertically() {
        let m = Matrix::from_rows(&[vec![0.0, 1.0, 1.0, 0.0]]).unwrap();
        let out = resize_bilinear(&m, 5, 20);
        for i in 1..5 {
            assert_eq!(out.row(i), out.row(0));
        }
    }
}
