//! Descending quality search toward a byte budget.
//!
//! A run starts at the request's initial quality and steps down by a fixed
//! amount after every attempt that is still over budget. It stops at the
//! first attempt that fits, at the quality floor, or when the attempt budget
//! is spent, whichever comes first. Because the search only ever moves down,
//! the first fitting attempt is the highest reachable quality that fits.

use std::borrow::Borrow;

use tracing::{debug, info, warn};

use super::{CompressError, CompressionRequest, QualityEncoder};
use crate::decode::SourceImage;
use crate::encode::EncodeError;

/// One encode-and-measure cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeAttempt {
    pub quality: u8,
    pub byte_size: usize,
    pub payload: Vec<u8>,
}

impl EncodeAttempt {
    fn new(quality: u8, payload: Vec<u8>) -> Self {
        Self {
            quality,
            byte_size: payload.len(),
            payload,
        }
    }
}

/// Outcome of a finished run.
///
/// `target_met == false` is a valid best-effort outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    payload: Vec<u8>,
    final_quality: u8,
    attempts_used: u32,
    target_met: bool,
}

impl CompressionResult {
    fn from_attempt(attempt: EncodeAttempt, attempts_used: u32, target_bytes: u64) -> Self {
        Self {
            target_met: attempt.byte_size as u64 <= target_bytes,
            final_quality: attempt.quality,
            payload: attempt.payload,
            attempts_used,
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    pub fn final_quality(&self) -> u8 {
        self.final_quality
    }

    pub fn byte_size(&self) -> usize {
        self.payload.len()
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    pub fn target_met(&self) -> bool {
        self.target_met
    }
}

/// What a single [`CompressionRun::step`] produced.
#[derive(Debug)]
pub enum RunState {
    /// Still over budget; the next step encodes at `next_quality`.
    Continue { next_quality: u8 },
    Done(CompressionResult),
}

/// A target-size search driven one encode at a time.
///
/// Each `step` is a suspension point: the caller may yield to its event loop
/// between steps, or drop the run to abandon it. A dropped run makes no
/// further encoder calls and yields no result.
///
/// The source may be owned or borrowed (`SourceImage` or `&SourceImage`);
/// either way the run only reads it.
pub struct CompressionRun<S, E> {
    source: S,
    request: CompressionRequest,
    encoder: E,
    quality: u8,
    attempts: u32,
    finished: bool,
}

impl<S, E> CompressionRun<S, E>
where
    S: Borrow<SourceImage>,
    E: QualityEncoder,
{
    /// Validate `request` and prepare a run. No encoding happens here.
    pub fn new(source: S, request: CompressionRequest, encoder: E) -> Result<Self, CompressError> {
        request.validate()?;

        Ok(Self {
            source,
            request,
            encoder,
            quality: request.initial_quality,
            attempts: 0,
            finished: false,
        })
    }

    /// Encode once at the current quality and decide whether to stop.
    ///
    /// An encoder failure ends the run. Stepping an ended run returns
    /// `CompressError::RunFinished` without calling the encoder.
    pub fn step(&mut self) -> Result<RunState, CompressError> {
        if self.finished {
            return Err(CompressError::RunFinished);
        }

        let quality = self.quality;
        let outcome = self.encoder.encode(self.source.borrow(), quality);
        self.attempts += 1;

        let payload = match outcome {
            Ok(payload) if !payload.is_empty() => payload,
            Ok(_) => return Err(self.fail(quality, EncodeError::EmptyOutput)),
            Err(reason) => return Err(self.fail(quality, reason)),
        };

        let attempt = EncodeAttempt::new(quality, payload);
        debug!(
            attempt = self.attempts,
            quality,
            byte_size = attempt.byte_size,
            target_bytes = self.request.target_bytes,
            "encode attempt"
        );

        let fits = attempt.byte_size as u64 <= self.request.target_bytes;
        let at_floor = quality <= self.request.min_quality;
        let out_of_attempts = self.attempts >= self.request.max_attempts;

        if fits || at_floor || out_of_attempts {
            self.finished = true;
            let result =
                CompressionResult::from_attempt(attempt, self.attempts, self.request.target_bytes);
            info!(
                final_quality = result.final_quality,
                byte_size = result.byte_size(),
                attempts_used = result.attempts_used,
                target_met = result.target_met,
                "compression run finished"
            );
            return Ok(RunState::Done(result));
        }

        self.quality = quality
            .saturating_sub(self.request.quality_step)
            .max(self.request.min_quality);

        Ok(RunState::Continue {
            next_quality: self.quality,
        })
    }

    /// Drive the run to completion.
    pub fn finish(mut self) -> Result<CompressionResult, CompressError> {
        loop {
            if let RunState::Done(result) = self.step()? {
                return Ok(result);
            }
        }
    }

    /// Quality the next step will encode at.
    pub fn next_quality(&self) -> u8 {
        self.quality
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn request(&self) -> &CompressionRequest {
        &self.request
    }

    /// Progress bar value in percent: attempts made over the attempt budget.
    pub fn progress(&self) -> f64 {
        if self.finished {
            return 100.0;
        }
        (self.attempts as f64 / self.request.max_attempts as f64 * 100.0).min(100.0)
    }

    fn fail(&mut self, quality: u8, reason: EncodeError) -> CompressError {
        self.finished = true;
        warn!(quality, attempt = self.attempts, error = %reason, "encoder failed");
        CompressError::EncodingFailed { quality, reason }
    }
}

/// Re-encode `source` at the highest quality on the request's schedule that
/// fits `target_bytes`, or the last one tried if none does.
///
/// Calls the encoder at most `request.max_attempts` times and never below
/// `request.min_quality`.
pub fn compress_to_target<E>(
    source: &SourceImage,
    request: &CompressionRequest,
    encoder: &E,
) -> Result<CompressionResult, CompressError>
where
    E: QualityEncoder + ?Sized,
{
    CompressionRun::new(source, *request, Borrowed(encoder))?.finish()
}

/// Encode once at a fixed quality (the compress tool's quality mode).
///
/// Quality is clamped to 1-100. There is no budget, so the result always
/// reports the target as met.
pub fn compress_with_quality<E>(
    source: &SourceImage,
    quality: u8,
    encoder: &E,
) -> Result<CompressionResult, CompressError>
where
    E: QualityEncoder + ?Sized,
{
    let quality = quality.clamp(1, 100);
    let request = CompressionRequest {
        target_bytes: u64::MAX,
        initial_quality: quality,
        quality_step: 1,
        min_quality: quality,
        max_attempts: 1,
    };
    compress_to_target(source, &request, encoder)
}

/// Lets a borrowed encoder of any kind drive a run.
struct Borrowed<'a, E: ?Sized>(&'a E);

impl<E: QualityEncoder + ?Sized> QualityEncoder for Borrowed<'_, E> {
    fn encode(&self, image: &SourceImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
        self.0.encode(image, quality)
    }
}
