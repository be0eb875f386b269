pub mod encoder;
pub mod viewer;

pub use encoder::Encoder;
pub use viewer::Viewer;
