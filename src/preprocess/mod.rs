pub mod canonical;
pub mod mask;
pub mod normalize;
pub mod resize;

pub use canonical::{CanonicalImage, CANONICAL_PIXELS, CANONICAL_SIDE};
pub use mask::RawMask;
pub use normalize::normalize;
