//! WASM bindings for cropping.
//!
//! The crop widget reports a pixel rectangle; the print layout page also
//! needs the initial centered box for a locked photo aspect.

use crate::types::JsDecodedImage;
use imagekit_core::transform::{
    apply_crop as core_crop, apply_crop_rect as core_crop_rect, centered_crop_rect, CropRect,
};
use wasm_bindgen::prelude::*;

/// Crop a pixel rectangle out of an image.
///
/// The rectangle is clamped to the image, so the result is at least 1x1.
#[wasm_bindgen]
pub fn apply_crop_rect(image: &JsDecodedImage, x: u32, y: u32, width: u32, height: u32) -> JsDecodedImage {
    let result = core_crop_rect(&image.to_decoded(), CropRect::new(x, y, width, height));
    JsDecodedImage::from_decoded(result)
}

/// Crop using normalized coordinates in 0.0..=1.0.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Keep the center 50% of the image
/// const cropped = apply_crop(image, 0.25, 0.25, 0.5, 0.5);
/// ```
#[wasm_bindgen]
pub fn apply_crop(image: &JsDecodedImage, left: f64, top: f64, width: f64, height: f64) -> JsDecodedImage {
    JsDecodedImage::from_decoded(core_crop(&image.to_decoded(), left, top, width, height))
}

/// Initial crop box as `{ x, y, width, height }`: the largest rectangle of
/// the given aspect (width / height) centered in the image.
#[wasm_bindgen]
pub fn centered_crop(image_width: u32, image_height: u32, aspect: f64) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&centered_crop_rect(image_width, image_height, aspect))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue. Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_centered_crop_binding() {
        let value = centered_crop(400, 300, 1.0).unwrap();
        let rect: CropRect = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(rect, CropRect::new(50, 0, 300, 300));
    }
}
