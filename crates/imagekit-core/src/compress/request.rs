//! Compression run configuration and the target-size presets.

use serde::{Deserialize, Serialize};

use super::CompressError;

/// Bytes per kilobyte as the tools count them.
pub const BYTES_PER_KB: u64 = 1024;

/// Parameters for one target-size compression run.
///
/// Built per user action and passed by value into the run; nothing about a
/// request outlives the run it configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionRequest {
    /// Maximum acceptable payload size in bytes.
    pub target_bytes: u64,
    /// Quality of the first attempt (1-100).
    pub initial_quality: u8,
    /// How far quality drops between attempts.
    pub quality_step: u8,
    /// Lowest quality the search may use.
    pub min_quality: u8,
    /// Hard cap on encoder calls.
    pub max_attempts: u32,
}

impl Default for CompressionRequest {
    /// The compress tool's "target size" mode at its initial 500 KB.
    fn default() -> Self {
        Self::compress_page(500)
    }
}

impl CompressionRequest {
    /// Search parameters used by the compress tool's "target size" mode.
    pub fn compress_page(target_kb: u64) -> Self {
        Self {
            target_bytes: target_kb.saturating_mul(BYTES_PER_KB),
            initial_quality: 90,
            quality_step: 8,
            min_quality: 10,
            max_attempts: 10,
        }
    }

    /// Search parameters used by the KB reducer tool.
    pub fn kb_reducer(target_kb: u64) -> Self {
        Self {
            target_bytes: target_kb.saturating_mul(BYTES_PER_KB),
            initial_quality: 90,
            quality_step: 7,
            min_quality: 5,
            max_attempts: 12,
        }
    }

    /// Same search parameters with a different budget.
    pub fn with_target_bytes(self, target_bytes: u64) -> Self {
        Self {
            target_bytes,
            ..self
        }
    }

    /// Check the request's invariants.
    ///
    /// Runs call this before their first encode, so a rejected request never
    /// touches the encoder.
    pub fn validate(&self) -> Result<(), CompressError> {
        if self.target_bytes == 0 {
            return Err(invalid("target size must be greater than zero"));
        }
        if self.max_attempts == 0 {
            return Err(invalid("max attempts must be greater than zero"));
        }
        if self.quality_step == 0 {
            return Err(invalid("quality step must be greater than zero"));
        }
        if self.min_quality == 0 {
            return Err(invalid("min quality must be at least 1"));
        }
        if self.initial_quality > 100 {
            return Err(invalid(format!(
                "initial quality {} exceeds 100",
                self.initial_quality
            )));
        }
        if self.min_quality > self.initial_quality {
            return Err(invalid(format!(
                "min quality {} is above initial quality {}",
                self.min_quality, self.initial_quality
            )));
        }
        Ok(())
    }

    /// Quality levels the search visits, in order, if no attempt meets the
    /// target first.
    pub fn quality_schedule(&self) -> Vec<u8> {
        let mut schedule = Vec::new();
        let mut quality = self.initial_quality;
        while (schedule.len() as u32) < self.max_attempts {
            schedule.push(quality);
            if quality <= self.min_quality {
                break;
            }
            quality = quality
                .saturating_sub(self.quality_step)
                .max(self.min_quality);
        }
        schedule
    }
}

fn invalid(message: impl Into<String>) -> CompressError {
    CompressError::InvalidConfiguration(message.into())
}

/// One of the KB reducer's target buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetPreset {
    pub label: &'static str,
    pub kilobytes: u64,
    pub description: &'static str,
}

/// Target buttons offered by the KB reducer, smallest first.
pub const TARGET_PRESETS: [TargetPreset; 5] = [
    TargetPreset {
        label: "100 KB",
        kilobytes: 100,
        description: "Ultra compressed",
    },
    TargetPreset {
        label: "200 KB",
        kilobytes: 200,
        description: "High compression",
    },
    TargetPreset {
        label: "500 KB",
        kilobytes: 500,
        description: "Balanced",
    },
    TargetPreset {
        label: "1 MB",
        kilobytes: 1024,
        description: "Good quality",
    },
    TargetPreset {
        label: "2 MB",
        kilobytes: 2048,
        description: "High quality",
    },
];

impl TargetPreset {
    pub fn all() -> &'static [TargetPreset] {
        &TARGET_PRESETS
    }

    /// The preset selected when the reducer opens.
    pub fn default_selection() -> TargetPreset {
        TARGET_PRESETS[1]
    }

    pub fn find(kilobytes: u64) -> Option<TargetPreset> {
        TARGET_PRESETS
            .iter()
            .copied()
            .find(|preset| preset.kilobytes == kilobytes)
    }

    pub fn target_bytes(&self) -> u64 {
        self.kilobytes * BYTES_PER_KB
    }

    /// The reducer's search parameters for this preset.
    pub fn request(&self) -> CompressionRequest {
        CompressionRequest::kb_reducer(self.kilobytes)
    }
}
