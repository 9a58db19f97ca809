//! Image resampling for the resize tool and for previews.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// The aspect ratio is not preserved; callers that want it locked compute
/// the second edge with [`crate::dimensions::AspectLock`] first.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target edge is zero and
/// `DecodeError::CorruptedFile` if the source buffer does not match its
/// declared dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer does not match dimensions".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize an image so its longest edge is at most `max_edge`, preserving
/// aspect ratio. Images that already fit are returned unchanged.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(image.width, image.height, max_edge);
    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(64);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_downscale() {
        let resized = resize(&gradient(160, 90), 80, 45, FilterType::Lanczos3).unwrap();

        assert_eq!((resized.width, resized.height), (80, 45));
        assert_eq!(resized.pixels.len(), 80 * 45 * 3);
    }

    #[test]
    fn test_resize_ignores_aspect_ratio() {
        let resized = resize(&gradient(100, 100), 150, 30, FilterType::Bilinear).unwrap();
        assert_eq!((resized.width, resized.height), (150, 30));
    }

    #[test]
    fn test_resize_same_dimensions_is_copy() {
        let img = gradient(40, 20);
        let resized = resize(&img, 40, 20, FilterType::Nearest).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = gradient(10, 10);

        assert!(matches!(
            resize(&img, 0, 5, FilterType::Bilinear),
            Err(DecodeError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(resize(&img, 5, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_mismatched_buffer_error() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 12],
        };
        assert!(matches!(
            resize(&img, 5, 5, FilterType::Bilinear),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let resized = resize_to_fit(&gradient(600, 400), 300, FilterType::Bilinear).unwrap();
        assert_eq!((resized.width, resized.height), (300, 200));
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let resized = resize_to_fit(&gradient(400, 600), 300, FilterType::Bilinear).unwrap();
        assert_eq!((resized.width, resized.height), (200, 300));
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = gradient(100, 50);
        let resized = resize_to_fit(&img, 256, FilterType::Bilinear).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_to_fit_zero_edge_error() {
        assert!(resize_to_fit(&gradient(10, 10), 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(calculate_fit_dimensions(6000, 4000, 2560), (2560, 1707));
        assert_eq!(calculate_fit_dimensions(4000, 6000, 2560), (1707, 2560));
        assert_eq!(calculate_fit_dimensions(4000, 4000, 256), (256, 256));
        assert_eq!(calculate_fit_dimensions(10000, 1, 100), (100, 1));
        assert_eq!(calculate_fit_dimensions(0, 0, 256), (0, 0));
    }
}
