//! WASM-compatible wrapper types for image data.
//!
//! These types wrap the core ImageKit types and handle the conversion
//! between Rust and JavaScript data representations.

use imagekit_core::decode::{DecodedImage, FilterType};
use imagekit_core::encode::OutputFormat;
use wasm_bindgen::prelude::*;

/// A decoded image held in WASM memory.
///
/// Calling `pixels()` copies the buffer out to a `Uint8Array`; keep images in
/// WASM memory between tool steps and only pull pixels out for display.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from RGB pixel data (3 bytes per pixel, row-major).
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or `pixels` is not exactly
    /// `width * height * 3` bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsDecodedImage, JsValue> {
        DecodedImage::from_pixels(width, height, pixels)
            .map(JsDecodedImage::from_decoded)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns the pixels expanded to RGBA, ready for `new ImageData(...)`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for rgb in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(rgb);
            rgba.push(255);
        }
        rgba
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Clone into a core image for passing to core functions.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a u8 filter value to the core FilterType.
///
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = Lanczos3
///
/// Any other value falls back to the default (Lanczos3).
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        1 => FilterType::Bilinear,
        2 => FilterType::Lanczos3,
        _ => FilterType::default(),
    }
}

/// Parse the resize page's format select value ("jpg" or "png").
pub(crate) fn format_from_str(name: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_name(name).ok_or_else(|| format!("Unsupported output format: {}", name))
}


/// WASM-specific tests that require JsValue. Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_constructor_rejects_short_buffer() {
        assert!(JsDecodedImage::new(100, 100, vec![0u8; 30]).is_err());
        assert!(JsDecodedImage::new(0, 10, Vec::new()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_short_buffer_never_reaches_crop() {
        let result = JsDecodedImage::new(50, 50, vec![1u8; 3])
            .map(|image| crate::transform::apply_crop_rect(&image, 10, 10, 20, 20));
        assert!(result.is_err());
    }
}
