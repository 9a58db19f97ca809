//! Decoding and resize bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode an uploaded JPEG or PNG file
//! - [`resize`] - Resize to exact dimensions
//! - [`resize_to_fit`] - Resize to fit within a max edge, preserving aspect ratio
//! - [`locked_height`] / [`locked_width`] - Keep the aspect ratio while editing one edge
//! - [`resize_presets`] - The preset size buttons
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize, locked_height } from '@imagekit/wasm';
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const height = locked_height(image.width, image.height, 800);
//! const resized = resize(image, 800, height, 2); // Lanczos3
//! ```

use crate::types::{filter_from_u8, JsDecodedImage};
use imagekit_core::decode;
use imagekit_core::dimensions::{AspectLock, ResizePreset};
use wasm_bindgen::prelude::*;

/// Decode an uploaded file, applying EXIF orientation.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize to exact dimensions.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize so the longest edge is at most `max_edge`. Used for previews.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_edge: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize_to_fit(&image.to_decoded(), max_edge, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Height matching `width` at the original image's aspect ratio.
///
/// Returns 0 when the original has a zero dimension; callers then keep the
/// user's value.
#[wasm_bindgen]
pub fn locked_height(original_width: u32, original_height: u32, width: u32) -> u32 {
    AspectLock::from_dimensions(original_width, original_height)
        .map(|lock| lock.height_for_width(width))
        .unwrap_or(0)
}

/// Width matching `height` at the original image's aspect ratio.
#[wasm_bindgen]
pub fn locked_width(original_width: u32, original_height: u32, height: u32) -> u32 {
    AspectLock::from_dimensions(original_width, original_height)
        .map(|lock| lock.width_for_height(height))
        .unwrap_or(0)
}

/// All resize presets as `{ label, width, height, category }` objects.
#[wasm_bindgen]
pub fn resize_presets() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(ResizePreset::all())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_dimensions() {
        assert_eq!(locked_height(1920, 1080, 1280), 720);
        assert_eq!(locked_width(1920, 1080, 720), 1280);
    }

    #[test]
    fn test_locked_dimensions_degenerate_original() {
        assert_eq!(locked_height(0, 1080, 1280), 0);
        assert_eq!(locked_width(1920, 0, 720), 0);
    }
}
