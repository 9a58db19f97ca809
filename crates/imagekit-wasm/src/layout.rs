//! Print layout bindings.
//!
//! # Example
//!
//! ```typescript
//! import { compute_print_layout, paper_sizes } from '@imagekit/wasm';
//!
//! const layout = compute_print_layout({
//!   paperWidthMm: 210, paperHeightMm: 297,
//!   photoWidthMm: 35, photoHeightMm: 45,
//!   marginMm: 10, copies: 8,
//! });
//! layout.placements.forEach(p => pdf.addImage(img, 'JPEG', p.xMm, p.yMm, 35, 45));
//! ```

use imagekit_core::layout::{self, LayoutRequest, PaperSize, PhotoSize, PAPER_SIZES, PHOTO_SIZES};
use wasm_bindgen::prelude::*;

/// Lay out a sheet. `request` is a camelCase `LayoutRequest` object.
#[wasm_bindgen]
pub fn compute_print_layout(request: JsValue) -> Result<JsValue, JsValue> {
    let request: LayoutRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&format!("Invalid layout request: {}", e)))?;
    let layout = layout::compute_layout(&request).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&layout).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Download name for a sheet of `copies` photos.
///
/// Returns `undefined` when `paper_key` is unknown.
#[wasm_bindgen]
pub fn print_layout_file_name(
    paper_key: &str,
    photo_width_mm: f64,
    photo_height_mm: f64,
    margin_mm: f64,
    copies: u32,
) -> Option<String> {
    let paper = PaperSize::find(paper_key)?;
    let photo = PhotoSize::custom(photo_width_mm, photo_height_mm);
    let request = LayoutRequest::new(paper, photo, margin_mm, copies);
    layout::compute_layout(&request)
        .ok()
        .map(|layout| layout.file_name(paper.key))
}

/// Paper size options as `{ key, label, widthMm, heightMm }`.
#[wasm_bindgen]
pub fn paper_sizes() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&PAPER_SIZES).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Photo size options as `{ key, label, widthMm, heightMm, category }`.
#[wasm_bindgen]
pub fn photo_sizes() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&PHOTO_SIZES).map_err(|e| JsValue::from_str(&e.to_string()))
}
