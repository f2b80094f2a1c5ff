//! Synthetic managed images for unit tests.
//!
//! The builder lives in its own file so the integration tests under `tests/` can include it
//! by path.

mod image;

pub use image::*;
