use std::path::Path;

use image::GrayImage;
use serde::Deserialize;

use crate::error::{DigitError, Result};
use crate::math::matrix::Matrix;

/// An arbitrary-sized grid of stroke intensities, `0.0` meaning background.
///
/// Deserializes from `{"rows": [[...], [...], ...]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "MaskRows")]
pub struct RawMask {
    grid: Matrix,
}

#[derive(Deserialize)]
struct MaskRows {
    rows: Vec<Vec<f64>>,
}

impl TryFrom<MaskRows> for RawMask {
    type Error = DigitError;

    fn try_from(value: MaskRows) -> Result<Self> {
        RawMask::from_rows(&value.rows)
    }
}

impl RawMask {
    pub fn zeros(rows: usize, cols: usize) -> RawMask {
        RawMask { grid: Matrix::zeros(rows, cols) }
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Result<RawMask> {
        Ok(RawMask { grid: Matrix::from_rows(rows)? })
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<RawMask> {
        Ok(RawMask { grid: Matrix::from_vec(rows, cols, data)? })
    }

    pub fn from_matrix(grid: Matrix) -> RawMask {
        RawMask { grid }
    }

    /// Grayscale pixels scaled from [0, 255] into [0, 1].
    pub fn from_luma(img: &GrayImage) -> RawMask {
        let (width, height) = img.dimensions();
        let data = img.pixels().map(|p| p.0[0] as f64 / 255.0).collect();
        RawMask {
            grid: Matrix::from_vec(height as usize, width as usize, data)
                .unwrap_or_default(),
        }
    }

    /// Decodes PNG/JPEG/BMP/GIF bytes into a mask. Strokes must be light on a
    /// dark background, as drawn.
    pub fn from_image_bytes(bytes: &[u8]) -> Result<RawMask> {
        let img = image::load_from_memory(bytes)?;
        Ok(RawMask::from_luma(&img.to_luma8()))
    }

    pub fn open_image(path: impl AsRef<Path>) -> Result<RawMask> {
        let img = image::open(path)?;
        Ok(RawMask::from_luma(&img.to_luma8()))
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.grid.get(i, j)
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.grid.set(i, j, value);
    }

    pub fn sum(&self) -> f64 {
        self.grid.as_slice().iter().sum()
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.grid
    }
}
