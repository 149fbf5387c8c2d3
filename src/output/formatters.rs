//! Reusable formatting utilities for CLI output
//!
//! Timestamps, sizes and percentages shared across commands.

use chrono::{DateTime, Local, Utc};

/// Format a UTC timestamp in local time.
///
/// # Example output
/// `2025-01-15 14:30`
pub fn format_timestamp_local(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Format Unix seconds in local time, "unknown" if out of range
pub fn format_unix_local(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| format_timestamp_local(&dt))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format a percentage with two decimals
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(3.5), "3.50%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn test_format_unix_local_out_of_range() {
        assert_eq!(format_unix_local(i64::MAX), "unknown");
        assert!(!format_unix_local(1_700_000_000).is_empty());
    }
}
