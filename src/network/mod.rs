pub mod network;
pub mod parameters;
pub mod result;
pub mod text_format;

pub use network::{classify, Network};
pub use parameters::{NetworkParameters, ParameterFiles, CLASSES};
pub use result::ClassificationResult;
