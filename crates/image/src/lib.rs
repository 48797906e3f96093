//! Image container for the videoio workspace.
//!
//! Images are `Tensor<T>` from `base` in HWC layout: `[height, width, channels]`,
//! one variant per sample depth. Rows are always stored contiguously.

pub mod error;
pub use error::ImageError;

pub mod fourcc;
pub use fourcc::*;

pub mod image;
pub use image::{Depth, Image};
