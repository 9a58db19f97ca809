//! Image decoding and resampling.
//!
//! This module provides functionality for:
//! - Decoding uploaded JPEG and PNG files with EXIF orientation applied
//! - Resizing decoded images for the resize tool and previews
//!
//! Every tool starts from a [`DecodedImage`]: an RGB8 buffer that is never
//! mutated once decoded.

mod resize;
mod types;
mod upload;

pub use resize::{resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation, SourceImage};
pub use upload::{decode_image, decode_image_no_orientation, detect_format, get_orientation};
