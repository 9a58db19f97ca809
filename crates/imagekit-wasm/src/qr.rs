//! QR code bindings.
//!
//! # Example
//!
//! ```typescript
//! import { generate_qr, qr_file_name } from '@imagekit/wasm';
//!
//! const image = generate_qr(
//!   { type: "wifi", ssid: "Home", password: "secret", security: "WPA" },
//!   { size: 256, errorLevel: "M", includeMargin: true },
//! );
//! const png = encode_image_as(image, "png", 100);
//! ```

use crate::types::JsDecodedImage;
use imagekit_core::qr::{self, QrContent, QrOptions, QR_COLOR_PRESETS};
use wasm_bindgen::prelude::*;

fn content_from_js(content: JsValue) -> Result<QrContent, JsValue> {
    serde_wasm_bindgen::from_value(content).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render a QR code. `options` may be omitted for the defaults
/// (256 px, black on white, level M, with margin).
#[wasm_bindgen]
pub fn generate_qr(content: JsValue, options: JsValue) -> Result<JsDecodedImage, JsValue> {
    let content = content_from_js(content)?;
    let options: QrOptions = if options.is_undefined() || options.is_null() {
        QrOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    qr::render_qr(&content, &options)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The text stored in the code, shown under the preview.
#[wasm_bindgen]
pub fn qr_payload(content: JsValue) -> Result<String, JsValue> {
    Ok(content_from_js(content)?.to_payload())
}

/// Colour preset buttons as `{ name, foreground, background }` objects.
#[wasm_bindgen]
pub fn qr_color_presets() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&QR_COLOR_PRESETS).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Download name, e.g. `qrcode-1700000000000.png`. Pass `Date.now()`.
#[wasm_bindgen]
pub fn qr_file_name(timestamp_ms: f64) -> String {
    qr::qr_file_name(timestamp_ms.max(0.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_file_name_binding() {
        assert_eq!(qr_file_name(1700000000000.0), "qrcode-1700000000000.png");
        assert_eq!(qr_file_name(-5.0), "qrcode-0.png");
    }
}
