//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGB pixel data to JPEG bytes
//! - [`encode_png`] - Encode RGB pixel data to PNG bytes
//! - [`encode_image_as`] - Encode a JsDecodedImage in the format picked on the resize page
//! - [`output_file_name`] - Download name for a resized image
//!
//! # Example
//!
//! ```typescript
//! import { encode_image_as, output_file_name } from '@imagekit/wasm';
//!
//! const bytes = encode_image_as(resized, "jpg", 90);
//! const name = output_file_name(resized.width, resized.height, "jpg");
//! ```

use crate::types::{format_from_str, JsDecodedImage};
use imagekit_core::dimensions::resized_file_name;
use imagekit_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGB pixel data to PNG bytes.
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as `"jpg"`/`"jpeg"` or `"png"`.
///
/// `quality` only applies to JPEG.
#[wasm_bindgen]
pub fn encode_image_as(image: &JsDecodedImage, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format = format_from_str(format).map_err(|e| JsValue::from_str(&e))?;
    encode::encode_image(&image.to_decoded(), format, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Download file name for a resized image, e.g. `resized-1280x720.jpg`.
#[wasm_bindgen]
pub fn output_file_name(width: u32, height: u32, format: &str) -> Result<String, JsValue> {
    let format = format_from_str(format).map_err(|e| JsValue::from_str(&e))?;
    Ok(resized_file_name(width, height, format.extension()))
}


/// WASM-specific tests that require JsValue. Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_image_as_formats() {
        let image = JsDecodedImage::new(6, 6, vec![200u8; 6 * 6 * 3]).unwrap();
        let jpeg = encode_image_as(&image, "jpg", 80).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let png = encode_image_as(&image, "png", 80).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_rejects_bad_input() {
        assert!(encode_jpeg(&[0u8; 5], 2, 2, 90).is_err());
        let image = JsDecodedImage::new(2, 2, vec![0u8; 12]).unwrap();
        assert!(encode_image_as(&image, "webp", 90).is_err());
    }
}
