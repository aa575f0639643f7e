//! Size Units
//!
//! Conversions and human-readable formatting for byte counts.

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Converts a byte count to (binary) megabytes.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Formats a byte count with the largest fitting unit, e.g. `"1.50MB"`.
///
/// Units step by 1024 from `B` up to `TB`; values past the gigabyte range
/// are always shown in terabytes.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;

    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.2}{}", size, unit);
        }
        size /= 1024.0;
    }

    format!("{:.2}TB", size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(0), 0.0);
        assert_eq!(bytes_to_mb(1024 * 1024), 1.0);
        assert_eq!(bytes_to_mb(512 * 1024), 0.5);
    }

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0.00B");
        assert_eq!(format_size(1023), "1023.00B");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1024), "1.00KB");
        assert_eq!(format_size(1536 * 1024), "1.50MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00GB");
    }

    #[test]
    fn test_format_size_terabytes() {
        assert_eq!(format_size(2 * 1024u64.pow(4)), "2.00TB");
        assert_eq!(format_size(2048 * 1024u64.pow(4)), "2048.00TB");
    }
}
