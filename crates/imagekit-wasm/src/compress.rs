//! Compression WASM bindings.
//!
//! Exposes the target-size search both as a one-shot call and as a
//! step-at-a-time run, so the page can update its progress bar and stay
//! responsive between encodes.
//!
//! # Example
//!
//! ```typescript
//! import { JsCompressionRun, kb_reducer_request } from '@imagekit/wasm';
//!
//! const run = new JsCompressionRun(image, kb_reducer_request(200));
//! let result;
//! while (!(result = run.step())) {
//!   progress.value = run.progress;
//!   await new Promise(requestAnimationFrame);
//! }
//! download(result.payload, `compressed-q${result.final_quality}.jpg`);
//! ```

use crate::types::JsDecodedImage;
use imagekit_core::compress::{
    self, CompressError, CompressionRequest, CompressionResult, CompressionRun,
    JpegQualityEncoder, RunState, TargetPreset,
};
use imagekit_core::decode::DecodedImage;
use wasm_bindgen::prelude::*;

/// Finished compression output.
#[wasm_bindgen]
pub struct JsCompressionResult {
    inner: CompressionResult,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// Encoded JPEG bytes as a `Uint8Array` copy.
    #[wasm_bindgen(getter)]
    pub fn payload(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.inner.payload())
    }

    #[wasm_bindgen(getter)]
    pub fn final_quality(&self) -> u8 {
        self.inner.final_quality()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_size(&self) -> usize {
        self.inner.byte_size()
    }

    #[wasm_bindgen(getter)]
    pub fn attempts_used(&self) -> u32 {
        self.inner.attempts_used()
    }

    /// False when the result is the best effort that still exceeds the target.
    #[wasm_bindgen(getter)]
    pub fn target_met(&self) -> bool {
        self.inner.target_met()
    }
}

/// A target-size search the page drives one encode per `step()`.
///
/// Call `cancel()` (or let the object be collected) to abandon the run.
#[wasm_bindgen]
pub struct JsCompressionRun {
    inner: CompressionRun<DecodedImage, JpegQualityEncoder>,
}

#[wasm_bindgen]
impl JsCompressionRun {
    /// Start a run over a copy of `image`.
    ///
    /// `request` is a `{ targetBytes, initialQuality, qualityStep, minQuality,
    /// maxAttempts }` object, as returned by `compress_page_request` or
    /// `kb_reducer_request`.
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsDecodedImage, request: JsValue) -> Result<JsCompressionRun, JsValue> {
        let request = request_from_js(request)?;
        let inner = CompressionRun::new(image.to_decoded(), request, JpegQualityEncoder)
            .map_err(to_js_error)?;
        Ok(JsCompressionRun { inner })
    }

    /// Encode once. Returns the result when the run is done, `undefined`
    /// when another step is needed.
    pub fn step(&mut self) -> Result<Option<JsCompressionResult>, JsValue> {
        match self.inner.step().map_err(to_js_error)? {
            RunState::Continue { .. } => Ok(None),
            RunState::Done(inner) => Ok(Some(JsCompressionResult { inner })),
        }
    }

    /// Progress in percent (0-100).
    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f64 {
        self.inner.progress()
    }

    #[wasm_bindgen(getter)]
    pub fn next_quality(&self) -> u8 {
        self.inner.next_quality()
    }

    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.inner.attempts()
    }

    #[wasm_bindgen(getter)]
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Abandon the run and release its copy of the image.
    pub fn cancel(self) {
        // Dropping self ends the run
    }
}

/// Run a whole target-size search in one call.
#[wasm_bindgen]
pub fn compress_to_target(image: &JsDecodedImage, request: JsValue) -> Result<JsCompressionResult, JsValue> {
    let request = request_from_js(request)?;
    compress::compress_to_target(&image.to_decoded(), &request, &JpegQualityEncoder)
        .map(|inner| JsCompressionResult { inner })
        .map_err(to_js_error)
}

/// Encode once at a fixed JPEG quality (1-100).
#[wasm_bindgen]
pub fn compress_with_quality(image: &JsDecodedImage, quality: u8) -> Result<JsCompressionResult, JsValue> {
    compress::compress_with_quality(&image.to_decoded(), quality, &JpegQualityEncoder)
        .map(|inner| JsCompressionResult { inner })
        .map_err(to_js_error)
}

/// Search parameters of the compress page for a target in KB.
#[wasm_bindgen]
pub fn compress_page_request(target_kb: u32) -> Result<JsValue, JsValue> {
    request_to_js(&CompressionRequest::compress_page(u64::from(target_kb)))
}

/// Search parameters of the KB reducer for a target in KB.
#[wasm_bindgen]
pub fn kb_reducer_request(target_kb: u32) -> Result<JsValue, JsValue> {
    request_to_js(&CompressionRequest::kb_reducer(u64::from(target_kb)))
}

/// The KB reducer's target buttons as `{ label, kilobytes, description }`.
#[wasm_bindgen]
pub fn target_presets() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(TargetPreset::all()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Byte count as shown on the result card, e.g. `"1.5 KB"`.
#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    compress::format_file_size(bytes.max(0.0) as u64)
}

/// Percentage saved relative to the original upload.
#[wasm_bindgen]
pub fn compression_ratio(original_bytes: f64, compressed_bytes: f64) -> f64 {
    compress::compression_ratio(original_bytes.max(0.0) as u64, compressed_bytes.max(0.0) as u64)
}

fn request_from_js(value: JsValue) -> Result<CompressionRequest, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid compression request: {}", e)))
}

fn request_to_js(request: &CompressionRequest) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(request).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encoder failures are also written to the browser console; the rejected
/// promise alone loses the quality the encoder failed at.
fn to_js_error(error: CompressError) -> JsValue {
    let message = error.to_string();
    if let CompressError::EncodingFailed { .. } = error {
        log_error(&message);
    }
    JsValue::from_str(&message)
}

#[cfg(target_arch = "wasm32")]
fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn log_error(_message: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> JsDecodedImage {
        let pixels = (0..width * height)
            .flat_map(|i| [(i % 256) as u8, (i / 7 % 256) as u8, (i * 3 % 256) as u8])
            .collect();
        JsDecodedImage::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_format_file_size_binding() {
        assert_eq!(format_file_size(1536.0), "1.5 KB");
        assert_eq!(format_file_size(-5.0), "0 Bytes");
    }

    #[test]
    fn test_compression_ratio_binding() {
        assert_eq!(compression_ratio(1000.0, 250.0), 75.0);
        assert_eq!(compression_ratio(0.0, 250.0), 0.0);
    }

    #[test]
    fn test_run_steps_until_done() {
        let image = gradient(16, 16);
        let request = CompressionRequest::kb_reducer(100);
        let inner = CompressionRun::new(image.to_decoded(), request, JpegQualityEncoder).unwrap();
        let mut run = JsCompressionRun { inner };

        let result = run.step().unwrap().expect("small image fits on the first attempt");
        assert!(result.target_met());
        assert_eq!(result.final_quality(), 90);
        assert_eq!(result.attempts_used(), 1);
        assert!(run.is_finished());
        assert_eq!(run.progress(), 100.0);
    }

    fn run_to_end(mut run: JsCompressionRun) -> (JsCompressionResult, u32) {
        let mut steps = 0;
        loop {
            steps += 1;
            if let Some(result) = run.step().unwrap() {
                return (result, steps);
            }
            assert!(run.progress() < 100.0);
        }
    }

    #[test]
    fn test_run_best_effort_stops_at_attempt_budget() {
        let image = gradient(32, 32);
        let request = CompressionRequest::compress_page(1).with_target_bytes(10);
        let inner = CompressionRun::new(image.to_decoded(), request, JpegQualityEncoder).unwrap();

        let (result, steps) = run_to_end(JsCompressionRun { inner });

        // 90, 82, ... 18: the budget of 10 runs out before the floor of 10.
        assert!(!result.target_met());
        assert_eq!(steps, request.max_attempts);
        assert_eq!(result.attempts_used(), request.max_attempts);
        assert_eq!(result.final_quality(), 18);
        assert_eq!(request.quality_schedule().last().copied(), Some(18));
    }

    #[test]
    fn test_run_best_effort_stops_at_floor() {
        let image = gradient(32, 32);
        let request = CompressionRequest {
            quality_step: 40,
            ..CompressionRequest::compress_page(1).with_target_bytes(10)
        };
        let inner = CompressionRun::new(image.to_decoded(), request, JpegQualityEncoder).unwrap();

        let (result, steps) = run_to_end(JsCompressionRun { inner });

        // 90, 50, 10: the floor is reached on the third attempt.
        assert!(!result.target_met());
        assert_eq!(steps, 3);
        assert_eq!(result.attempts_used(), 3);
        assert_eq!(result.final_quality(), request.min_quality);
    }
}

/// WASM-specific tests that require JsValue. Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn flat(width: u32, height: u32) -> JsDecodedImage {
        JsDecodedImage::new(width, height, vec![120u8; (width * height * 3) as usize]).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_compress_to_target_binding() {
        let request = kb_reducer_request(200).unwrap();
        let result = compress_to_target(&flat(20, 20), request).unwrap();
        assert!(result.target_met());
        assert_eq!(result.payload().length() as usize, result.byte_size());
    }

    #[wasm_bindgen_test]
    fn test_compress_with_quality_binding() {
        let result = compress_with_quality(&flat(10, 10), 75).unwrap();
        assert_eq!(result.final_quality(), 75);
        assert_eq!(result.attempts_used(), 1);
    }

    #[wasm_bindgen_test]
    fn test_request_helpers_round_trip() {
        let request: CompressionRequest =
            serde_wasm_bindgen::from_value(compress_page_request(500).unwrap()).unwrap();
        assert_eq!(request, CompressionRequest::compress_page(500));
    }

    #[wasm_bindgen_test]
    fn test_invalid_request_rejected() {
        let mut request = CompressionRequest::kb_reducer(200);
        request.max_attempts = 0;
        let value = serde_wasm_bindgen::to_value(&request).unwrap();
        assert!(JsCompressionRun::new(&flat(4, 4), value).is_err());
        assert!(compress_to_target(&flat(4, 4), JsValue::from_str("nope")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_stepping_finished_run_fails() {
        let value = kb_reducer_request(200).unwrap();
        let mut run = JsCompressionRun::new(&flat(4, 4), value).unwrap();
        assert!(run.step().unwrap().is_some());
        assert!(run.step().is_err());
    }

    #[wasm_bindgen_test]
    fn test_target_presets_binding() {
        let value = target_presets().unwrap();
        assert_eq!(js_sys::Array::from(&value).length(), 5);
    }
}
