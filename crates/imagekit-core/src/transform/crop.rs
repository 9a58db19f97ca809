//! Image cropping.
//!
//! The crop widget reports the selected area in source pixels; the same
//! region can also be given in normalized coordinates (0.0 to 1.0) relative
//! to the image, which is independent of the decoded resolution.
//!
//! - (0.0, 0.0) = top-left corner
//! - (1.0, 1.0) = bottom-right corner

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// A crop region in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamp to an image of the given size. The result is at least 1x1 and
    /// lies entirely inside the image.
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> CropRect {
        let x = self.x.min(image_width.saturating_sub(1));
        let y = self.y.min(image_height.saturating_sub(1));
        let right = x.saturating_add(self.width).min(image_width);
        let bottom = y.saturating_add(self.height).min(image_height);

        CropRect {
            x,
            y,
            width: right.saturating_sub(x).max(1),
            height: bottom.saturating_sub(y).max(1),
        }
    }
}

/// Largest rectangle with the given aspect ratio (width / height), centered
/// in an image of the given size. This is the initial crop box when the
/// print layout tool locks the crop to a photo size.
///
/// A non-positive or non-finite aspect yields the whole image.
pub fn centered_crop_rect(image_width: u32, image_height: u32, aspect: f64) -> CropRect {
    if !(aspect.is_finite() && aspect > 0.0) || image_width == 0 || image_height == 0 {
        return CropRect::new(0, 0, image_width, image_height);
    }

    let image_aspect = image_width as f64 / image_height as f64;
    let (width, height) = if image_aspect > aspect {
        let width = (image_height as f64 * aspect).round() as u32;
        (width.clamp(1, image_width), image_height)
    } else {
        let height = (image_width as f64 / aspect).round() as u32;
        (image_width, height.clamp(1, image_height))
    };

    CropRect::new((image_width - width) / 2, (image_height - height) / 2, width, height)
}

/// Crop a pixel region out of an image.
///
/// The rect is clamped to the image first, so the output is never empty.
pub fn apply_crop_rect(image: &DecodedImage, rect: CropRect) -> DecodedImage {
    if image.is_empty() {
        return image.clone();
    }

    let rect = rect.clamp_to(image.width, image.height);
    if rect == CropRect::new(0, 0, image.width, image.height) {
        return image.clone();
    }

    let src_stride = image.width as usize * 3;
    let row_len = rect.width as usize * 3;
    let mut pixels = Vec::with_capacity(row_len * rect.height as usize);

    for y in rect.y..rect.y + rect.height {
        let start = y as usize * src_stride + rect.x as usize * 3;
        pixels.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage {
        width: rect.width,
        height: rect.height,
        pixels,
    }
}

/// Crop using normalized coordinates.
///
/// Coordinates are clamped to 0.0..=1.0 and converted to pixels by
/// rounding; the output is at least 1x1.
pub fn apply_crop(image: &DecodedImage, left: f64, top: f64, width: f64, height: f64) -> DecodedImage {
    let to_px = |value: f64, extent: u32| (value.clamp(0.0, 1.0) * extent as f64).round() as u32;

    let rect = CropRect::new(
        to_px(left, image.width),
        to_px(top, image.height),
        to_px(width, image.width),
        to_px(height, image.height),
    );
    apply_crop_rect(image, rect)
}
