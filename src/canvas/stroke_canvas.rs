use crate::math::matrix::Matrix;
use crate::preprocess::canonical::CANONICAL_SIDE;
use crate::preprocess::mask::RawMask;

/// Side of the on-screen drawing surface, in surface pixels.
pub const DEFAULT_SURFACE: u32 = 448;

/// A coarse grid that surface-space strokes are painted onto.
///
/// Each cell covers a `surface / side` square of the drawing surface. Painting
/// sets a cell to 1.0, erasing sets it back to 0.0.
#[derive(Debug, Clone)]
pub struct StrokeCanvas {
    grid: Matrix,
    surface: u32,
}

impl Default for StrokeCanvas {
    fn default() -> Self {
        StrokeCanvas::new(CANONICAL_SIDE, DEFAULT_SURFACE)
    }
}

impl StrokeCanvas {
    pub fn new(side: usize, surface: u32) -> StrokeCanvas {
        StrokeCanvas { grid: Matrix::zeros(side, side), surface }
    }

    /// Maps a surface point to its grid cell; `None` off the surface.
    fn cell(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let surface = self.surface as i64;
        let (x, y) = (x as i64, y as i64);
        if !(0..surface).contains(&x) || !(0..surface).contains(&y) {
            return None;
        }
        let side = self.grid.rows() as i64;
        Some(((y * side / surface) as usize, (x * side / surface) as usize))
    }

    pub fn paint(&mut self, x: i32, y: i32) {
        if let Some((row, col)) = self.cell(x, y) {
            self.grid.set(row, col, 1.0);
        }
    }

    pub fn erase(&mut self, x: i32, y: i32) {
        if let Some((row, col)) = self.cell(x, y) {
            self.grid.set(row, col, 0.0);
        }
    }

    pub fn clear(&mut self) {
        self.grid = Matrix::zeros(self.grid.rows(), self.grid.cols());
    }

    pub fn is_blank(&self) -> bool {
        self.grid.as_slice().iter().all(|&v| v == 0.0)
    }

    /// Snapshot of the current strokes for normalization.
    pub fn to_mask(&self) -> RawMask {
        RawMask::from_matrix(self.grid.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_points_map_to_cells() {
        let mut canvas = StrokeCanvas::default();
        canvas.paint(0, 0);
        canvas.paint(447, 447);
        canvas.paint(31, 16);
        let mask = canvas.to_mask();
        assert_eq!(mask.get(0, 0), 1.0);
        assert_eq!(mask.get(27, 27), 1.0);
        assert_eq!(mask.get(1, 1), 1.0);
        assert_eq!(mask.sum(), 3.0);
    }

    #[test]
    fn off_surface_points_are_ignored() {
        let mut canvas = StrokeCanvas::default();
        canvas.paint(-1, 10);
        canvas.paint(448, 10);
        canvas.paint(10, 10_000);
        assert!(canvas.is_blank());
    }

    #[test]
    fn erase_and_clear() {
        let mut canvas = StrokeCanvas::default();
        canvas.paint(100, 100);
        canvas.paint(200, 200);
        canvas.erase(101, 110);
        assert_eq!(canvas.to_mask().sum(), 1.0);
        canvas.clear();
        assert!(canvas.is_blank());
    }
}
