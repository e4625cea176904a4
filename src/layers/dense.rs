use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};
use crate::error::{DigitError, Result};

/// A fully connected layer evaluated as `activation(W·x + b)`.
///
/// `weights` is `out × input_size`; `biases` has `out` entries. Shapes are
/// fixed at construction.
#[derive(Debug, Clone)]
pub struct Layer{
    input_size: usize,
    weights: Matrix,
    biases: Vec<f64>,
    pub activator: ActivationFunction
}

impl Layer {
    pub fn new(weights: Matrix, biases: Vec<f64>, activation: ActivationFunction) -> Result<Layer> {
        if biases.len() != weights.rows() {
            return Err(DigitError::DimensionMismatch {
                what: "layer bias length",
                expected: weights.rows(),
                actual: biases.len(),
            });
        }

        Ok(Layer {
            input_size: weights.cols(),
            weights,
            biases,
            activator: activation
        })
    }

    pub fn feed_from(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size {
            return Err(DigitError::DimensionMismatch {
                what: "layer input length",
                expected: self.input_size,
                actual: input.len(),
            });
        }
        let mut z = self.weights.mul_vec(input)?;
        for (zi, b) in z.iter_mut().zip(&self.biases) {
            *zi += b;
        }
        Ok(self.activator.apply(&z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_from_applies_weights_bias_and_relu() {
        let w = Matrix::from_rows(&[vec![1.0, -1.0], vec![2.0, 0.5]]).unwrap();
        let layer = Layer::new(w, vec![0.0, -10.0], ActivationFunction::ReLU).unwrap();
        // z = [3 - 1, 6 + 0.5 - 10] = [2, -3.5]
        assert_eq!(layer.feed_from(&[3.0, 1.0]).unwrap(), vec![2.0, 0.0]);
    }

    #[test]
    fn rejects_wrong_input_length() {
        let layer = Layer::new(Matrix::zeros(3, 4), vec![0.0; 3], ActivationFunction::ReLU).unwrap();
        let err = layer.feed_from(&[1.0; 5]).unwrap_err();
        assert!(matches!(err, DigitError::DimensionMismatch { expected: 4, actual: 5, .. }));
    }

    #[test]
    fn rejects_bias_of_wrong_length() {
        assert!(Layer::new(Matrix::zeros(3, 4), vec![0.0; 2], ActivationFunction::Softmax).is_err());
    }
}
