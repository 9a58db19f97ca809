//! Compression to a fixed quality or to a target file size.
//!
//! The target-size search re-encodes a source image at descending quality
//! levels until the payload fits a byte budget, the quality floor is
//! reached, or the attempt budget runs out. Results that miss the target
//! are returned as best effort (`target_met() == false`), not as errors.
//!
//! # Examples
//!
//! ```ignore
//! use imagekit_core::compress::{compress_to_target, CompressionRequest, JpegQualityEncoder};
//!
//! let request = CompressionRequest::kb_reducer(200);
//! let result = compress_to_target(&image, &request, &JpegQualityEncoder)?;
//! println!("q={} size={}", result.final_quality(), result.byte_size());
//! ```

mod encoder;
mod report;
mod request;
mod run;

use thiserror::Error;

use crate::encode::EncodeError;

pub use encoder::{JpegQualityEncoder, QualityEncoder};
pub use report::{compression_ratio, format_file_size};
pub use request::{CompressionRequest, TargetPreset, BYTES_PER_KB, TARGET_PRESETS};
pub use run::{
    compress_to_target, compress_with_quality, CompressionResult, CompressionRun, EncodeAttempt,
    RunState,
};

/// Errors that end a compression run.
#[derive(Debug, Error)]
pub enum CompressError {
    /// The request violates its invariants. Reported before any encode.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The encoder produced no usable output. Not retried.
    #[error("Encoding failed at quality {quality}: {reason}")]
    EncodingFailed {
        quality: u8,
        #[source]
        reason: EncodeError,
    },

    /// `step` was called on a run that already ended.
    #[error("Compression run already finished")]
    RunFinished,
}
