pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod preprocess;
pub mod canvas;
pub mod config;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::{classify, Network};
pub use network::parameters::{NetworkParameters, ParameterFiles};
pub use network::result::ClassificationResult;
pub use preprocess::{normalize, CanonicalImage, RawMask};
pub use canvas::StrokeCanvas;
pub use error::{DigitError, Result};

/// Normalizes `mask` and classifies it with `network` in one step.
pub fn recognize(mask: &RawMask, network: &Network) -> Result<ClassificationResult> {
    let image = normalize(mask)?;
    network.classify(&image)
}
