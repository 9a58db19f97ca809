//! Image encoding for download.
//!
//! This module provides:
//! - JPEG encoding with a configurable quality (the lossy primitive the
//!   compressor searches over)
//! - PNG encoding for lossless resize output
//! - [`OutputFormat`] to pick between them from the resize tool
//!
//! All operations are synchronous and single-threaded.

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur while encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec reported an error
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// The codec finished without producing any bytes
    #[error("Encoder produced no output")]
    EmptyOutput,
}

/// Download format offered by the resize tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[serde(alias = "jpg")]
    Jpeg,
    #[default]
    Png,
}

impl OutputFormat {
    /// File extension used for downloads.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    /// Whether the quality setting has any effect.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }

    /// Parse a format name as the tool pages spell it.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }
}

/// Encode a decoded image in the given format. `quality` is ignored for PNG.
pub fn encode_image(
    image: &DecodedImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, quality),
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height),
    }
}

fn validate_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::from_name("jpg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_name("JPEG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_name("png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_name("webp"), None);

        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
        assert!(OutputFormat::Jpeg.is_lossy());
        assert!(!OutputFormat::default().is_lossy());
    }

    #[test]
    fn test_encode_image_dispatches_on_format() {
        let img = DecodedImage::new(4, 4, vec![200u8; 4 * 4 * 3]);

        let jpeg = encode_image(&img, OutputFormat::Jpeg, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        let png = encode_image(&img, OutputFormat::Png, 90).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_png_ignores_quality() {
        let img = DecodedImage::new(4, 4, vec![33u8; 4 * 4 * 3]);
        assert_eq!(
            encode_image(&img, OutputFormat::Png, 1).unwrap(),
            encode_image(&img, OutputFormat::Png, 100).unwrap()
        );
    }

    #[test]
    fn test_validate_buffer() {
        assert!(validate_buffer(&[0; 12], 2, 2).is_ok());
        assert!(validate_buffer(&[0; 11], 2, 2).is_err());
        assert!(validate_buffer(&[], 0, 2).is_err());
    }
}
