//! Human-readable size figures shown next to a compression result.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count the way the tool pages display it.
///
/// Base 1024, at most two decimals, trailing zeros dropped:
/// `0` is `"0 Bytes"`, `1536` is `"1.5 KB"`, `1048576` is `"1 MB"`.
/// Anything past gigabytes stays in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimals(value), UNITS[unit])
}

fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Percentage of the original size saved by compression.
///
/// Negative when the output grew; `0.0` when there is no original size.
pub fn compression_ratio(original_bytes: u64, compressed_bytes: u64) -> f64 {
    if original_bytes == 0 {
        return 0.0;
    }
    (original_bytes as f64 - compressed_bytes as f64) / original_bytes as f64 * 100.0
}
