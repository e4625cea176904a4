use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::error::{DigitError, Result};
use crate::math::matrix::Matrix;
use crate::network::text_format::{load_matrix, save_matrix};
use crate::preprocess::canonical::CANONICAL_PIXELS;

/// Number of output classes (digits 0-9).
pub const CLASSES: usize = 10;

/// File names of the six tensors inside a parameter directory.
///
/// The defaults are the names the trained parameter files ship with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterFiles {
    pub w1: String,
    pub b1: String,
    pub w2: String,
    pub b2: String,
    pub w3: String,
    pub b3: String,
}

impl Default for ParameterFiles {
    fn default() -> Self {
        ParameterFiles {
            w1: "w1new.txt".into(),
            b1: "b1new.txt".into(),
            w2: "w2new.txt".into(),
            b2: "b2new.txt".into(),
            w3: "w3new.txt".into(),
            b3: "b3new.txt".into(),
        }
    }
}

/// Pre-trained weights and biases of the 784 → h1 → h2 → 10 network.
///
/// The fields are private and only reachable through validating
/// constructors, so a value of this type always has consistent shapes:
/// `W1: h1×784`, `W2: h2×h1`, `W3: 10×h2`, and each bias an `n×1` column
/// whose length matches its weight matrix's row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkParameters {
    w1: Matrix,
    b1: Matrix,
    w2: Matrix,
    b2: Matrix,
    w3: Matrix,
    b3: Matrix,
}

/// Unvalidated mirror of `NetworkParameters` used for JSON decoding.
#[derive(Deserialize)]
struct RawParameters {
    w1: Matrix,
    b1: Matrix,
    w2: Matrix,
    b2: Matrix,
    w3: Matrix,
    b3: Matrix,
}

impl NetworkParameters {
    pub fn new(w1: Matrix, b1: Matrix, w2: Matrix, b2: Matrix, w3: Matrix, b3: Matrix) -> Result<Self> {
        let params = NetworkParameters { w1, b1, w2, b2, w3, b3 };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<()> {
        let check = |name: &str, ok: bool, reason: String| {
            if ok { Ok(()) } else { Err(DigitError::format(name, None, reason)) }
        };

        check("W1", self.w1.cols() == CANONICAL_PIXELS,
            format!("W1 must have {} columns, has {}", CANONICAL_PIXELS, self.w1.cols()))?;
        check("W2", self.w2.cols() == self.w1.rows(),
            format!("W2 has {} columns but W1 has {} rows", self.w2.cols(), self.w1.rows()))?;
        check("W3", self.w3.cols() == self.w2.rows(),
            format!("W3 has {} columns but W2 has {} rows", self.w3.cols(), self.w2.rows()))?;
        check("W3", self.w3.rows() == CLASSES,
            format!("W3 must have {} rows, has {}", CLASSES, self.w3.rows()))?;

        for (name, bias, weights) in [("B1", &self.b1, &self.w1), ("B2", &self.b2, &self.w2), ("B3", &self.b3, &self.w3)] {
            check(name, bias.cols() == 1,
                format!("{} must be a column vector, has {} columns", name, bias.cols()))?;
            check(name, bias.rows() == weights.rows(),
                format!("{} has {} entries but its weight matrix has {} rows", name, bias.rows(), weights.rows()))?;
        }
        Ok(())
    }

    /// Loads the six text tensors from `dir`. Nothing is returned unless every
    /// file parses and the set is dimensionally consistent.
    pub fn load_dir(dir: impl AsRef<Path>, files: &ParameterFiles) -> Result<Self> {
        let dir = dir.as_ref();
        let load = |name: &str| load_matrix(dir.join(name));

        let params = NetworkParameters::new(
            load(&files.w1)?,
            load(&files.b1)?,
            load(&files.w2)?,
            load(&files.b2)?,
            load(&files.w3)?,
            load(&files.b3)?,
        )?;

        let (h1, h2) = params.hidden_sizes();
        tracing::info!(dir = %dir.display(), h1, h2, "loaded network parameters");
        Ok(params)
    }

    /// Writes the six tensors into `dir` using the text format.
    pub fn save_dir(&self, dir: impl AsRef<Path>, files: &ParameterFiles) -> Result<()> {
        let dir = dir.as_ref();
        let path = |name: &str| -> PathBuf { dir.join(name) };
        save_matrix(path(&files.w1), &self.w1)?;
        save_matrix(path(&files.b1), &self.b1)?;
        save_matrix(path(&files.w2), &self.w2)?;
        save_matrix(path(&files.b2), &self.b2)?;
        save_matrix(path(&files.w3), &self.w3)?;
        save_matrix(path(&files.b3), &self.b3)
    }

    /// Serializes all six tensors to a single pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| DigitError::io(path, e))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a bundle written by `save_json`, re-checking every shape.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DigitError::io(path, e))?;
        let raw: RawParameters = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            if e.is_data() {
                DigitError::format(&path.display().to_string(), Some(e.line()), e.to_string())
            } else {
                DigitError::from(e)
            }
        })?;
        NetworkParameters::new(raw.w1, raw.b1, raw.w2, raw.b2, raw.w3, raw.b3)
    }

    /// Widths (h1, h2) of the two hidden layers.
    pub fn hidden_sizes(&self) -> (usize, usize) {
        (self.w1.rows(), self.w2.rows())
    }

    pub fn w1(&self) -> &Matrix { &self.w1 }
    pub fn b1(&self) -> &Matrix { &self.b1 }
    pub fn w2(&self) -> &Matrix { &self.w2 }
    pub fn b2(&self) -> &Matrix { &self.b2 }
    pub fn w3(&self) -> &Matrix { &self.w3 }
    pub fn b3(&self) -> &Matrix { &self.b3 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeros(h1: usize, h2: usize) -> [Matrix; 6] {
        [
            Matrix::zeros(h1, CANONICAL_PIXELS),
            Matrix::zeros(h1, 1),
            Matrix::zeros(h2, h1),
            Matrix::zeros(h2, 1),
            Matrix::zeros(CLASSES, h2),
            Matrix::zeros(CLASSES, 1),
        ]
    }

    fn build(m: [Matrix; 6]) -> Result<NetworkParameters> {
        let [w1, b1, w2, b2, w3, b3] = m;
        NetworkParameters::new(w1, b1, w2, b2, w3, b3)
    }

    #[test]
    fn accepts_consistent_shapes() {
        let p = build(zeros(16, 8)).unwrap();
        assert_eq!(p.hidden_sizes(), (16, 8));
    }

    #[test]
    fn rejects_wrong_input_width() {
        let mut m = zeros(4, 3);
        m[0] = Matrix::zeros(4, 783);
        assert!(matches!(build(m), Err(DigitError::ParameterFormat { .. })));
    }

    #[test]
    fn rejects_layer_chain_breaks() {
        let mut m = zeros(4, 3);
        m[2] = Matrix::zeros(3, 5);
        assert!(build(m).is_err());

        let mut m = zeros(4, 3);
        m[4] = Matrix::zeros(CLASSES, 4);
        assert!(build(m).is_err());

        let mut m = zeros(4, 3);
        m[4] = Matrix::zeros(9, 3);
        m[5] = Matrix::zeros(9, 1);
        assert!(build(m).is_err());
    }

    #[test]
    fn rejects_bad_biases() {
        let mut m = zeros(4, 3);
        m[1] = Matrix::zeros(5, 1);
        assert!(build(m).is_err());

        let mut m = zeros(4, 3);
        m[3] = Matrix::zeros(1, 3);
        assert!(build(m).is_err());
    }
}
