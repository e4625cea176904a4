use crate::activation::activation::ActivationFunction;
use crate::error::{DigitError, Result};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::parameters::{NetworkParameters, CLASSES};
use crate::network::result::ClassificationResult;
use crate::preprocess::canonical::CanonicalImage;

/// The fixed 784 → h1 (ReLU) → h2 (ReLU) → 10 (Softmax) classifier.
///
/// Holds no per-call state, so one instance can be shared behind an `Arc`
/// by any number of threads.
#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    pub fn from_parameters(params: &NetworkParameters) -> Result<Network> {
        let layer = |w: &Matrix, b: &Matrix, act: ActivationFunction| {
            Layer::new(w.clone(), b.as_slice().to_vec(), act)
        };
        let layers = vec![
            layer(params.w1(), params.b1(), ActivationFunction::ReLU)?,
            layer(params.w2(), params.b2(), ActivationFunction::ReLU)?,
            layer(params.w3(), params.b3(), ActivationFunction::Softmax)?,
        ];
        Ok(Network { layers })
    }

    /// Forward pass over the row-major flattening of `image`.
    pub fn probabilities(&self, image: &CanonicalImage) -> Result<[f64; CLASSES]> {
        let mut current = image.as_slice().to_vec();
        for layer in &self.layers {
            current = layer.feed_from(&current)?;
        }
        let len = current.len();
        current.try_into().map_err(|_| DigitError::DimensionMismatch {
            what: "network output length",
            expected: CLASSES,
            actual: len,
        })
    }

    pub fn classify(&self, image: &CanonicalImage) -> Result<ClassificationResult> {
        let probabilities = self.probabilities(image)?;
        let result = ClassificationResult::from_probabilities(probabilities);
        tracing::debug!(label = result.label, confidence = result.confidence, "classified digit");
        Ok(result)
    }
}

/// One-shot classification straight from parameters.
///
/// Builds the layers on every call; hold a `Network` instead when classifying
/// repeatedly.
pub fn classify(image: &CanonicalImage, params: &NetworkParameters) -> Result<ClassificationResult> {
    Network::from_parameters(params)?.classify(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::canonical::CANONICAL_PIXELS;

    /// h1 = 2 (mass, nothing), h2 = 2 (identity), logits put mass on `digit`.
    fn mass_detector(digit: usize, scale: f64) -> NetworkParameters {
        let mut w1 = Matrix::zeros(2, CANONICAL_PIXELS);
        for j in 0..CANONICAL_PIXELS {
            w1.set(0, j, scale);
        }
        let w2 = Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let mut w3 = Matrix::zeros(CLASSES, 2);
        w3.set(digit, 0, 1.0);
        NetworkParameters::new(
            w1, Matrix::zeros(2, 1),
            w2, Matrix::zeros(2, 1),
            w3, Matrix::zeros(CLASSES, 1),
        ).unwrap()
    }

    #[test]
    fn blank_image_with_zero_network_is_uniform() {
        let params = mass_detector(5, 0.0);
        let image = CanonicalImage::from_pixels(vec![0.0; CANONICAL_PIXELS]).unwrap();
        let result = classify(&image, &params).unwrap();
        assert_eq!(result.label, 0);
        assert!((result.confidence - 0.1).abs() < 1e-15);
    }

    #[test]
    fn mass_goes_to_the_wired_digit() {
        let params = mass_detector(7, 0.01);
        let mut px = vec![0.0; CANONICAL_PIXELS];
        for p in px.iter_mut().take(100) {
            *p = 1.0;
        }
        let image = CanonicalImage::from_pixels(px).unwrap();
        let result = Network::from_parameters(&params).unwrap().classify(&image).unwrap();
        // logits: z[7] = 1.0, others 0
        let e = 1.0_f64.exp();
        assert_eq!(result.label, 7);
        assert!((result.confidence - e / (e + 9.0)).abs() < 1e-12);
        let total: f64 = result.probabilities.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn hidden_relu_blocks_negative_evidence() {
        // Negative mass weight is clipped by the first ReLU, leaving uniform logits.
        let params = mass_detector(2, -1.0);
        let image = CanonicalImage::from_pixels(vec![0.5; CANONICAL_PIXELS]).unwrap();
        let p = Network::from_parameters(&params).unwrap().probabilities(&image).unwrap();
        assert!(p.iter().all(|&x| (x - 0.1).abs() < 1e-15));
    }
}
