//! QR code generation for the QR tool.
//!
//! The tool builds a payload string from one of several content types
//! (plain text, URL, e-mail, phone, SMS, Wi-Fi) and renders it as a square
//! RGB image with chosen colours, error correction and quiet zone.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decode::DecodedImage;

/// Characters left as-is in an SMS body, matching JavaScript's
/// `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Light modules around the code when a margin is included.
pub const QUIET_ZONE_MODULES: usize = 4;

/// Output edge range offered by the size slider, in pixels.
pub const MIN_QR_SIZE: u32 = 128;
pub const MAX_QR_SIZE: u32 = 512;

#[derive(Debug, Error, PartialEq)]
pub enum QrError {
    #[error("QR content is empty")]
    EmptyContent,

    #[error("QR encoding failed: {0}")]
    Encoding(String),

    #[error("Invalid colour: {0:?} (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("Invalid QR size: {0} px (must be 128-512)")]
    InvalidSize(u32),

    #[error("{size} px is too small for {modules} modules")]
    SizeTooSmall { size: u32, modules: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WifiSecurity {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPassword,
}

impl WifiSecurity {
    fn as_str(self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::NoPassword => "nopass",
        }
    }
}

/// What the code encodes, as picked with the tool's type buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QrContent {
    Text { content: String },
    Url { content: String },
    Email { content: String },
    Phone { content: String },
    Sms { phone: String, message: String },
    Wifi {
        ssid: String,
        password: String,
        #[serde(default)]
        security: WifiSecurity,
        #[serde(default)]
        hidden: bool,
    },
}

impl QrContent {
    /// The string stored in the code.
    ///
    /// URLs without an `http` prefix get `https://`; SMS bodies are
    /// percent-encoded; Wi-Fi uses the `WIFI:T:..;S:..;P:..;H:..;;` format.
    pub fn to_payload(&self) -> String {
        match self {
            QrContent::Text { content } => content.clone(),
            QrContent::Url { content } if content.starts_with("http") => content.clone(),
            QrContent::Url { content } => format!("https://{}", content),
            QrContent::Email { content } => format!("mailto:{}", content),
            QrContent::Phone { content } => format!("tel:{}", content),
            QrContent::Sms { phone, message } => format!(
                "sms:{}?body={}",
                phone,
                utf8_percent_encode(message, URI_COMPONENT)
            ),
            QrContent::Wifi {
                ssid,
                password,
                security,
                hidden,
            } => format!(
                "WIFI:T:{};S:{};P:{};H:{};;",
                security.as_str(),
                ssid,
                password,
                hidden
            ),
        }
    }
}

/// Error correction level: share of the code that may be damaged and still
/// read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorLevel {
    /// ~7%
    L,
    /// ~15%
    #[default]
    M,
    /// ~25%
    Q,
    /// ~30%
    H,
}

impl From<ErrorLevel> for EcLevel {
    fn from(level: ErrorLevel) -> Self {
        match level {
            ErrorLevel::L => EcLevel::L,
            ErrorLevel::M => EcLevel::M,
            ErrorLevel::Q => EcLevel::Q,
            ErrorLevel::H => EcLevel::H,
        }
    }
}

/// Rendering options. Missing fields take the tool's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrOptions {
    pub size: u32,
    pub foreground: String,
    pub background: String,
    pub error_level: ErrorLevel,
    pub include_margin: bool,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: 256,
            foreground: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            error_level: ErrorLevel::M,
            include_margin: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QrColorPreset {
    pub name: &'static str,
    pub foreground: &'static str,
    pub background: &'static str,
}

pub const QR_COLOR_PRESETS: [QrColorPreset; 5] = [
    QrColorPreset {
        name: "Classic",
        foreground: "#000000",
        background: "#FFFFFF",
    },
    QrColorPreset {
        name: "Blue",
        foreground: "#1e40af",
        background: "#dbeafe",
    },
    QrColorPreset {
        name: "Green",
        foreground: "#166534",
        background: "#dcfce7",
    },
    QrColorPreset {
        name: "Purple",
        foreground: "#7c3aed",
        background: "#f3e8ff",
    },
    QrColorPreset {
        name: "Red",
        foreground: "#dc2626",
        background: "#fee2e2",
    },
];

/// The module grid of an encoded payload, without quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }
}

/// Encode a payload into its module grid.
pub fn encode_matrix(payload: &str, level: ErrorLevel) -> Result<QrMatrix, QrError> {
    if payload.is_empty() {
        return Err(QrError::EmptyContent);
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), level.into())
        .map_err(|e| QrError::Encoding(e.to_string()))?;

    Ok(QrMatrix {
        width: code.width(),
        dark: code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect(),
    })
}

/// Render `content` as a `size` x `size` RGB image.
///
/// Modules are scaled by nearest neighbour so the output is exactly the
/// requested size.
pub fn render_qr(content: &QrContent, options: &QrOptions) -> Result<DecodedImage, QrError> {
    let foreground = parse_hex_color(&options.foreground)?;
    let background = parse_hex_color(&options.background)?;
    if !(MIN_QR_SIZE..=MAX_QR_SIZE).contains(&options.size) {
        return Err(QrError::InvalidSize(options.size));
    }

    let matrix = encode_matrix(&content.to_payload(), options.error_level)?;
    let margin = if options.include_margin {
        QUIET_ZONE_MODULES
    } else {
        0
    };
    let modules = matrix.width() + margin * 2;
    let size = options.size as usize;
    if size < modules {
        return Err(QrError::SizeTooSmall {
            size: options.size,
            modules,
        });
    }

    let module_at = |pixel: usize| (pixel * modules / size).checked_sub(margin);
    let mut pixels = Vec::with_capacity(size * size * 3);
    for py in 0..size {
        let my = module_at(py);
        for px in 0..size {
            let dark = match (module_at(px), my) {
                (Some(mx), Some(my)) => matrix.is_dark(mx, my),
                _ => false,
            };
            pixels.extend_from_slice(if dark { &foreground } else { &background });
        }
    }

    debug!(
        modules,
        size = options.size,
        level = ?options.error_level,
        "rendered qr code"
    );
    Ok(DecodedImage::new(options.size, options.size, pixels))
}

/// Download name for a rendered code, e.g. `qrcode-1700000000000.png`.
pub fn qr_file_name(timestamp_ms: u64) -> String {
    format!("qrcode-{}.png", timestamp_ms)
}

/// Parse `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex_color(value: &str) -> Result<[u8; 3], QrError> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(QrError::InvalidColor(value.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| QrError::InvalidColor(value.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}
