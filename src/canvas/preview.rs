use crate::math::matrix::Matrix;

/// Cells at or below this intensity render as background.
pub const DISPLAY_THRESHOLD: f64 = 0.2;

/// Display copies are brightened by this factor, then capped at 1.
const DISPLAY_GAIN: f64 = 3.0;

/// 5-tap Gaussian with automatic sigma, as used for the on-screen copy.
const KERNEL: [f64; 5] = [1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0];

const SHADES: &[u8] = b".:-=+*#%@";

/// Mirrors `p` into `0..n` without repeating the edge cell (`dcb|abcd|cba`).
fn reflect(p: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let mut p = p;
    while p < 0 || p >= n {
        p = if p < 0 { -p } else { 2 * n - 2 - p };
    }
    p as usize
}

/// The softened copy of a grid that gets drawn: a separable 5×5 Gaussian
/// blur, then `min(3v, 1)`. Only for display; classification never sees it.
pub fn display_grid(grid: &Matrix) -> Matrix {
    let (rows, cols) = grid.shape();
    let radius = (KERNEL.len() / 2) as isize;

    let mut horizontal = Matrix::zeros(rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            let v = KERNEL.iter().enumerate()
                .map(|(k, w)| w * grid.get(i, reflect(j as isize + k as isize - radius, cols)))
                .sum();
            horizontal.set(i, j, v);
        }
    }

    let mut out = Matrix::zeros(rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            let v: f64 = KERNEL.iter().enumerate()
                .map(|(k, w)| w * horizontal.get(reflect(i as isize + k as isize - radius, rows), j))
                .sum();
            out.set(i, j, (v * DISPLAY_GAIN).min(1.0));
        }
    }
    out
}

/// Draws the display copy of a grid as text, one line per row, two
/// characters per cell so the output looks roughly square in a terminal.
pub fn render_ascii(grid: &Matrix) -> String {
    let shown = display_grid(grid);
    let mut out = String::with_capacity(shown.rows() * (2 * shown.cols() + 1));
    for i in 0..shown.rows() {
        for &v in shown.row(i) {
            let ch = if v > DISPLAY_THRESHOLD {
                let level = (v * (SHADES.len() - 1) as f64).round() as usize;
                SHADES[level] as char
            } else {
                ' '
            };
            out.push(ch);
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot() -> Matrix {
        let mut grid = Matrix::zeros(5, 5);
        grid.set(2, 2, 1.0);
        grid
    }

    #[test]
    fn reflect_skips_the_edge_cell() {
        assert_eq!(reflect(-1, 5), 1);
        assert_eq!(reflect(-2, 5), 2);
        assert_eq!(reflect(5, 5), 3);
        assert_eq!(reflect(6, 5), 2);
        assert_eq!(reflect(-2, 2), 0);
        assert_eq!(reflect(3, 1), 0);
    }

    #[test]
    fn display_copy_blurs_and_brightens() {
        let shown = display_grid(&dot());
        assert!((shown.get(2, 2) - 3.0 * 36.0 / 256.0).abs() < 1e-12);
        assert!((shown.get(2, 1) - 3.0 * 24.0 / 256.0).abs() < 1e-12);
        assert!((shown.get(1, 1) - 3.0 * 16.0 / 256.0).abs() < 1e-12);

        let full = display_grid(&Matrix::from_vec(3, 4, vec![1.0; 12]).unwrap());
        assert!(full.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn dot_renders_as_a_small_plus() {
        let text = render_ascii(&dot());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "          ");
        assert_eq!(lines[1], "    --    ");
        assert_eq!(lines[2], "  --==--  ");
        assert_eq!(lines[3], "    --    ");
        assert_eq!(lines[4], "          ");
    }

    #[test]
    fn blank_grid_renders_blank() {
        let text = render_ascii(&Matrix::zeros(2, 3));
        assert_eq!(text, "      \n      \n");
    }
}
