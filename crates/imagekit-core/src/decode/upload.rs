//! Decoding of uploaded image files with EXIF orientation handling.
//!
//! Browsers apply the EXIF orientation tag when they draw an uploaded photo
//! onto a canvas, so the tools do the same before any resize or re-encode.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an uploaded JPEG or PNG file, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized
/// image format, `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::InvalidDimensions` if the image has no pixels.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = read_dynamic(bytes)?;
    Ok(DecodedImage::from_rgb_image(
        apply_orientation(img, orientation).into_rgb8(),
    ))
}

/// Decode an uploaded file without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = read_dynamic(bytes)?;
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Sniff the container format of an uploaded file.
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Extract EXIF orientation value from file bytes.
///
/// Returns `Orientation::Normal` when no EXIF block or tag is present.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    ensure_non_empty(img)
}

fn ensure_non_empty(img: DynamicImage) -> Result<DynamicImage, DecodeError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(img)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_jpeg;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 40) as u8, (y * 40) as u8, 200])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_jpeg_upload() {
        let jpeg = encode_jpeg(&vec![90u8; 16 * 8 * 3], 16, 8, 90).unwrap();
        let img = decode_image(&jpeg).unwrap();

        assert_eq!((img.width, img.height), (16, 8));
        assert_eq!(img.pixels.len(), 16 * 8 * 3);
    }

    #[test]
    fn test_decode_png_upload_is_lossless() {
        let png = png_bytes(3, 2);
        let img = decode_image(&png).unwrap();

        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(&img.pixels[0..3], &[0, 0, 200]);
        assert_eq!(&img.pixels[3..6], &[40, 0, 200]);
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(&png_bytes(1, 1)), Some(ImageFormat::Png));
        let jpeg = encode_jpeg(&[0, 0, 0], 1, 1, 80).unwrap();
        assert_eq!(detect_format(&jpeg), Some(ImageFormat::Jpeg));
        assert_eq!(detect_format(b"hello"), None);
    }

    #[test]
    fn test_decode_unknown_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_file() {
        let png = png_bytes(8, 8);
        let result = decode_image_no_orientation(&png[..png.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_image_without_pixels_rejected() {
        let result = ensure_non_empty(DynamicImage::new_rgb8(0, 5));
        assert!(matches!(
            result,
            Err(DecodeError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(ensure_non_empty(DynamicImage::new_rgb8(1, 1)).is_ok());
    }

    #[test]
    fn test_orientation_defaults_without_exif() {
        assert_eq!(get_orientation(&png_bytes(2, 2)), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let rotated = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::Rotate90CW);

        assert_eq!(rotated.into_rgb8().dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let flipped = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::FlipHorizontal)
            .into_rgb8();

        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(flipped.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
