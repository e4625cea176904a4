pub mod preview;
pub mod stroke_canvas;

pub use preview::render_ascii;
pub use stroke_canvas::StrokeCanvas;
