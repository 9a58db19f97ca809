//! Target dimensions for the resize tool.
//!
//! Presets cover common social, screen and print sizes. [`AspectLock`]
//! keeps the other edge in step when the user edits one edge with
//! "maintain aspect ratio" switched on.

use serde::{Deserialize, Serialize};

/// Grouping used to lay out the preset buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Social,
    Standard,
    Print,
}

/// A named output size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizePreset {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
    pub category: PresetCategory,
}

const fn preset(label: &'static str, width: u32, height: u32, category: PresetCategory) -> ResizePreset {
    ResizePreset {
        label,
        width,
        height,
        category,
    }
}

pub const RESIZE_PRESETS: [ResizePreset; 9] = [
    preset("Instagram Square", 1080, 1080, PresetCategory::Social),
    preset("Instagram Story", 1080, 1920, PresetCategory::Social),
    preset("Facebook Cover", 1200, 630, PresetCategory::Social),
    preset("Twitter Header", 1500, 500, PresetCategory::Social),
    preset("YouTube Thumbnail", 1280, 720, PresetCategory::Social),
    preset("LinkedIn Banner", 1584, 396, PresetCategory::Social),
    preset("HD (1920×1080)", 1920, 1080, PresetCategory::Standard),
    preset("4K (3840×2160)", 3840, 2160, PresetCategory::Standard),
    preset("A4 Print (2480×3508)", 2480, 3508, PresetCategory::Print),
];

impl ResizePreset {
    pub fn all() -> &'static [ResizePreset] {
        &RESIZE_PRESETS
    }

    pub fn in_category(category: PresetCategory) -> impl Iterator<Item = &'static ResizePreset> {
        RESIZE_PRESETS
            .iter()
            .filter(move |preset| preset.category == category)
    }

    pub fn find(label: &str) -> Option<&'static ResizePreset> {
        RESIZE_PRESETS.iter().find(|preset| preset.label == label)
    }

    /// Download name for an image resized to this preset.
    pub fn file_name(&self, extension: &str) -> String {
        resized_file_name(self.width, self.height, extension)
    }
}

/// `resized-{width}x{height}.{ext}`
pub fn resized_file_name(width: u32, height: u32, extension: &str) -> String {
    format!("resized-{}x{}.{}", width, height, extension)
}

/// Aspect ratio captured from the uploaded image's original dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectLock {
    ratio: f64,
}

impl AspectLock {
    /// `None` when either edge is zero.
    pub fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            ratio: width as f64 / height as f64,
        })
    }

    /// Width divided by height.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn height_for_width(&self, width: u32) -> u32 {
        ((width as f64 / self.ratio).round() as u32).max(1)
    }

    pub fn width_for_height(&self, height: u32) -> u32 {
        ((height as f64 * self.ratio).round() as u32).max(1)
    }
}
