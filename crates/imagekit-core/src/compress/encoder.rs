//! The lossy-encode primitive a compression run calls.

use crate::decode::SourceImage;
use crate::encode::{encode_jpeg, EncodeError};

/// Encodes an image at a quality level (1-100).
///
/// Size must not grow as quality drops for the search to return the best
/// quality that fits, but runs terminate regardless.
pub trait QualityEncoder {
    fn encode(&self, image: &SourceImage, quality: u8) -> Result<Vec<u8>, EncodeError>;
}

impl<F> QualityEncoder for F
where
    F: Fn(&SourceImage, u8) -> Result<Vec<u8>, EncodeError>,
{
    fn encode(&self, image: &SourceImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
        self(image, quality)
    }
}

/// Baseline JPEG, the format every compression tool downloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegQualityEncoder;

impl QualityEncoder for JpegQualityEncoder {
    fn encode(&self, image: &SourceImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
        encode_jpeg(&image.pixels, image.width, image.height, quality)
    }
}
