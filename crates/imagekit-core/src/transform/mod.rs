//! Geometric transforms applied before an image is resized or tiled.
//!
//! Only cropping is needed by the tools. Crop regions come either in source
//! pixels (from the crop widget) or normalized to 0.0..=1.0.

mod crop;

pub use crop::{apply_crop, apply_crop_rect, centered_crop_rect, CropRect};
