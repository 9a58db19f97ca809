//! Print sheet layout: how many copies of a photo fit on a sheet of paper
//! and where each one goes.
//!
//! All measurements are millimetres with the origin at the sheet's top-left
//! corner. Photos are tiled edge to edge, row by row, inside the margin.
//! Rendering the sheet to PDF is left to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for layout requests that cannot produce a sheet.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Invalid photo size: {width} x {height} mm")]
    InvalidPhotoSize { width: f64, height: f64 },

    #[error("Invalid paper size: {width} x {height} mm")]
    InvalidPaperSize { width: f64, height: f64 },

    #[error("Margin must not be negative: {0} mm")]
    NegativeMargin(f64),

    #[error("At least one copy is required")]
    NoCopies,

    #[error("Too many copies: {copies} (at most {max})")]
    TooManyCopies { copies: u32, max: u32 },
}

/// Smallest photo edge the layout accepts, in millimetres.
pub const MIN_PHOTO_SIZE_MM: f64 = 1.0;

/// Upper bound on copies per sheet.
pub const MAX_COPIES: u32 = 1000;

/// A sheet of paper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperSize {
    pub key: &'static str,
    pub label: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
}

pub const PAPER_SIZES: [PaperSize; 4] = [
    PaperSize {
        key: "a4",
        label: "A4 (210 × 297 mm)",
        width_mm: 210.0,
        height_mm: 297.0,
    },
    PaperSize {
        key: "a3",
        label: "A3 (297 × 420 mm)",
        width_mm: 297.0,
        height_mm: 420.0,
    },
    PaperSize {
        key: "4x6",
        label: "4×6 inch (102 × 152 mm)",
        width_mm: 102.0,
        height_mm: 152.0,
    },
    PaperSize {
        key: "letter",
        label: "Letter (216 × 279 mm)",
        width_mm: 216.0,
        height_mm: 279.0,
    },
];

impl PaperSize {
    pub fn find(key: &str) -> Option<PaperSize> {
        PAPER_SIZES.iter().copied().find(|paper| paper.key == key)
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        PAPER_SIZES[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoCategory {
    Passport,
    Stamp,
    Standard,
    Custom,
}

/// A printed photo size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSize {
    pub key: &'static str,
    pub label: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
    pub category: PhotoCategory,
}

const fn photo(
    key: &'static str,
    label: &'static str,
    width_mm: f64,
    height_mm: f64,
    category: PhotoCategory,
) -> PhotoSize {
    PhotoSize {
        key,
        label,
        width_mm,
        height_mm,
        category,
    }
}

pub const PHOTO_SIZES: [PhotoSize; 11] = [
    photo("51x51", "51×51 mm (Passport)", 51.0, 51.0, PhotoCategory::Passport),
    photo("35x45", "35×45 mm (Passport)", 35.0, 45.0, PhotoCategory::Passport),
    photo("33x48", "33×48 mm (Passport)", 33.0, 48.0, PhotoCategory::Passport),
    photo("25x32", "25×32 mm (ID Card)", 25.0, 32.0, PhotoCategory::Passport),
    photo("20x25", "20×25 mm (Small Stamp)", 20.0, 25.0, PhotoCategory::Stamp),
    photo("25x30", "25×30 mm (Medium Stamp)", 25.0, 30.0, PhotoCategory::Stamp),
    photo("30x40", "30×40 mm (Large Stamp)", 30.0, 40.0, PhotoCategory::Stamp),
    photo("40x50", "40×50 mm (XL Stamp)", 40.0, 50.0, PhotoCategory::Stamp),
    photo("50x75", "50×75 mm (2×3 inch)", 50.0, 75.0, PhotoCategory::Standard),
    photo("89x127", "89×127 mm (3.5×5 inch)", 89.0, 127.0, PhotoCategory::Standard),
    photo("102x152", "102×152 mm (4×6 inch)", 102.0, 152.0, PhotoCategory::Standard),
];

impl PhotoSize {
    pub fn find(key: &str) -> Option<PhotoSize> {
        PHOTO_SIZES.iter().copied().find(|photo| photo.key == key)
    }

    pub fn custom(width_mm: f64, height_mm: f64) -> PhotoSize {
        photo("custom", "Custom Size", width_mm, height_mm, PhotoCategory::Custom)
    }

    /// Width over height, used to constrain the crop box.
    pub fn aspect_ratio(&self) -> f64 {
        self.width_mm / self.height_mm
    }
}

/// Everything needed to lay out one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub paper_width_mm: f64,
    pub paper_height_mm: f64,
    pub photo_width_mm: f64,
    pub photo_height_mm: f64,
    pub margin_mm: f64,
    pub copies: u32,
}

impl Default for LayoutRequest {
    /// Six passport photos on A4 with a 10 mm margin.
    fn default() -> Self {
        Self::new(PaperSize::default(), PHOTO_SIZES[0], 10.0, 6)
    }
}

impl LayoutRequest {
    pub fn new(paper: PaperSize, photo: PhotoSize, margin_mm: f64, copies: u32) -> Self {
        Self {
            paper_width_mm: paper.width_mm,
            paper_height_mm: paper.height_mm,
            photo_width_mm: photo.width_mm,
            photo_height_mm: photo.height_mm,
            margin_mm,
            copies,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    Portrait,
    Landscape,
}

/// Top-left corner of one photo on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub row: u32,
    pub column: u32,
    pub x_mm: f64,
    pub y_mm: f64,
}

/// A computed sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintLayout {
    pub orientation: PageOrientation,
    pub photos_per_row: u32,
    pub photos_per_column: u32,
    /// Capacity of the sheet, independent of the copies requested.
    pub max_photos: u32,
    /// Copies the user asked for; may exceed `max_photos`.
    pub copies: u32,
    pub photo_width_mm: f64,
    pub photo_height_mm: f64,
    pub placements: Vec<Placement>,
}

impl PrintLayout {
    /// Number of photos actually placed.
    pub fn placed(&self) -> u32 {
        self.placements.len() as u32
    }

    /// Download name for the rendered sheet. Names the copies requested,
    /// which is what the page's copies field shows.
    pub fn file_name(&self, paper_key: &str) -> String {
        format!(
            "print-layout-{}-{}x{}mm-{}copies-HQ.pdf",
            paper_key,
            self.photo_width_mm,
            self.photo_height_mm,
            self.copies
        )
    }
}

/// Tile `request.copies` photos onto the sheet.
///
/// Photo edges below [`MIN_PHOTO_SIZE_MM`] and more than [`MAX_COPIES`]
/// copies are rejected. Copies beyond the sheet's capacity are dropped; a
/// photo larger than the printable area yields an empty layout rather than
/// an error.
pub fn compute_layout(request: &LayoutRequest) -> Result<PrintLayout, LayoutError> {
    let LayoutRequest {
        paper_width_mm,
        paper_height_mm,
        photo_width_mm,
        photo_height_mm,
        margin_mm,
        copies,
    } = *request;

    if !(paper_width_mm > 0.0
        && paper_height_mm > 0.0
        && paper_width_mm.is_finite()
        && paper_height_mm.is_finite())
    {
        return Err(LayoutError::InvalidPaperSize {
            width: paper_width_mm,
            height: paper_height_mm,
        });
    }
    if !(photo_width_mm >= MIN_PHOTO_SIZE_MM && photo_height_mm >= MIN_PHOTO_SIZE_MM) {
        return Err(LayoutError::InvalidPhotoSize {
            width: photo_width_mm,
            height: photo_height_mm,
        });
    }
    if margin_mm < 0.0 || margin_mm.is_nan() {
        return Err(LayoutError::NegativeMargin(margin_mm));
    }
    if copies == 0 {
        return Err(LayoutError::NoCopies);
    }
    if copies > MAX_COPIES {
        return Err(LayoutError::TooManyCopies {
            copies,
            max: MAX_COPIES,
        });
    }

    let available_width = paper_width_mm - margin_mm * 2.0;
    let available_height = paper_height_mm - margin_mm * 2.0;
    let photos_per_row = fit_count(available_width, photo_width_mm);
    let photos_per_column = fit_count(available_height, photo_height_mm);
    let max_photos = photos_per_row.saturating_mul(photos_per_column);

    let placed = copies.min(max_photos);
    let placements = (0..placed)
        .map(|index| {
            let row = index / photos_per_row;
            let column = index % photos_per_row;
            Placement {
                row,
                column,
                x_mm: margin_mm + column as f64 * photo_width_mm,
                y_mm: margin_mm + row as f64 * photo_height_mm,
            }
        })
        .collect();

    let orientation = if paper_width_mm > paper_height_mm {
        PageOrientation::Landscape
    } else {
        PageOrientation::Portrait
    };

    Ok(PrintLayout {
        orientation,
        photos_per_row,
        photos_per_column,
        max_photos,
        copies,
        photo_width_mm,
        photo_height_mm,
        placements,
    })
}

fn fit_count(available: f64, size: f64) -> u32 {
    if available <= 0.0 {
        return 0;
    }
    (available / size).floor() as u32
}
