//! Boundary between the collage pipeline and the image service.
//!
//! The pipeline only sees [`ImageGenerator`]; live, recording and replaying
//! implementations live in `src/adapters/`.

pub mod image_generator;

pub use image_generator::{ImageGenerator, ImageRequest};
