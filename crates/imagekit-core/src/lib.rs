//! ImageKit Core - image tool library
//!
//! This crate provides the processing behind the ImageKit tools: decoding
//! uploads, resizing, cropping, JPEG/PNG encoding, compression to a target
//! file size, print sheet layout, and QR code rendering.

pub mod compress;
pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod layout;
pub mod qr;
pub mod transform;

pub use compress::{
    compress_to_target, compress_with_quality, CompressError, CompressionRequest,
    CompressionResult, CompressionRun, JpegQualityEncoder, QualityEncoder, RunState,
};
pub use decode::{DecodedImage, SourceImage};
pub use encode::OutputFormat;
pub use layout::{compute_layout, LayoutRequest, PrintLayout};
pub use qr::{render_qr, QrContent, QrOptions};
pub use transform::{apply_crop, apply_crop_rect, CropRect};
