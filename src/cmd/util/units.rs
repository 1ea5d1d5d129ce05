//! Byte quantity formatting.

const UNITS: &[&str] = &["KiB", "MiB", "GiB", "TiB", "PiB"];

/// Formats a byte count with binary units, two decimal places past KiB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2}{}", UNITS[unit])
}
