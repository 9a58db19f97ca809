//! JPEG encoding at a caller-chosen quality.
//!
//! This is the lossy primitive behind the compress and KB reducer tools:
//! the same pixels encoded at a lower quality give a smaller payload.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate_buffer, EncodeError};

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Quality Guidelines
///
/// * 90: what the tools start from when searching for a target size
/// * 80: the compress tool's fixed-quality default
/// * Below 30: visible blocking, used only when a tight size budget forces it
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Vec::new();

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    if buffer.is_empty() {
        return Err(EncodeError::EmptyOutput);
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy(width: u32, height: u32) -> Vec<u8> {
        (0..(width * height * 3) as usize)
            .map(|i| ((i * 7919) % 251) as u8)
            .collect()
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_jpeg(&vec![128u8; 64 * 64 * 3], 64, 64, 90).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_lower_quality_is_smaller_for_detailed_image() {
        let pixels = noisy(64, 64);

        let low = encode_jpeg(&pixels, 64, 64, 10).unwrap();
        let high = encode_jpeg(&pixels, 64, 64, 95).unwrap();

        assert!(low.len() < high.len(), "low={} high={}", low.len(), high.len());
    }

    #[test]
    fn test_quality_clamping() {
        let pixels = vec![128u8; 8 * 8 * 3];

        assert!(encode_jpeg(&pixels, 8, 8, 0).is_ok());
        assert!(encode_jpeg(&pixels, 8, 8, 255).is_ok());
        assert_eq!(
            encode_jpeg(&pixels, 8, 8, 255).unwrap(),
            encode_jpeg(&pixels, 8, 8, 100).unwrap()
        );
    }

    #[test]
    fn test_invalid_pixel_data() {
        let pixels = vec![128u8; 9 * 10 * 3];
        assert!(matches!(
            encode_jpeg(&pixels, 10, 10, 90),
            Err(EncodeError::InvalidPixelData {
                expected: 300,
                actual: 270
            })
        ));
    }

    #[test]
    fn test_zero_dimensions() {
        assert!(matches!(
            encode_jpeg(&[], 0, 10, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_jpeg(&[], 10, 0, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_single_pixel() {
        let jpeg = encode_jpeg(&[255, 0, 0], 1, 1, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
