//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When the output was produced (RFC 3339)
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON wrapped with metadata
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::BakerBuilder;

    #[test]
    fn test_format_json_wraps_data() {
        let bakers = vec![BakerBuilder::new("tz1abc").alias("Example").build()];

        let result = format_json(&bakers).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["data"][0]["address"], "tz1abc");
        assert_eq!(parsed["data"][0]["stakingBalance"], 10_000_000_000i64);
        assert_eq!(parsed["meta"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(parsed["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_format_json_unsized_slice() {
        let keys: &[&str] = &["network_stats", "current_cycle"];
        let result = format_json(keys).unwrap();
        assert!(result.contains("\"network_stats\""));
    }
}
