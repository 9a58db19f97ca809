//! ImageKit WASM - WebAssembly bindings for the ImageKit tools
//!
//! This crate exposes imagekit-core to the browser pages.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Upload decoding, resize and aspect lock helpers
//! - `encode` - JPEG/PNG download encoding
//! - `compress` - Fixed-quality and target-size compression
//! - `transform` - Cropping
//! - `layout` - Print sheet layout
//! - `qr` - QR code generation
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, compress_to_target, kb_reducer_request } from '@imagekit/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const result = compress_to_target(image, kb_reducer_request(200));
//! console.log(`${result.byte_size} bytes at quality ${result.final_quality}`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod decode;
mod encode;
mod layout;
mod qr;
mod transform;
mod types;

pub use compress::{
    compress_page_request, compress_to_target, compress_with_quality, compression_ratio,
    format_file_size, kb_reducer_request, target_presets, JsCompressionResult, JsCompressionRun,
};
pub use decode::{decode_image, locked_height, locked_width, resize, resize_presets, resize_to_fit};
pub use encode::{encode_image_as, encode_jpeg, encode_png, output_file_name};
pub use layout::{compute_print_layout, paper_sizes, photo_sizes, print_layout_file_name};
pub use qr::{generate_qr, qr_color_presets, qr_file_name, qr_payload};
pub use transform::{apply_crop, apply_crop_rect, centered_crop};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
