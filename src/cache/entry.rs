//! Cache entries and the metadata views handed out by the store

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single cached payload with its capture time and TTL.
///
/// Entries are immutable: the timestamp is fixed at construction and an
/// update replaces the whole entry. The key is carried inside the entry so
/// the durable tier can round-trip it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    data: T,
    timestamp: i64,
    ttl: i64,
    key: String,
}

impl<T> CacheEntry<T> {
    pub fn new(key: impl Into<String>, data: T, ttl_millis: i64, now_millis: i64) -> Self {
        Self {
            data,
            timestamp: now_millis,
            ttl: ttl_millis,
            key: key.into(),
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    /// Capture time in epoch milliseconds
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Lifetime in milliseconds
    pub fn ttl(&self) -> i64 {
        self.ttl
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn age(&self, now_millis: i64) -> i64 {
        now_millis - self.timestamp
    }

    /// Expired once strictly more than `ttl` has elapsed.
    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.age(now_millis) > self.ttl
    }
}

/// Cached data together with the expiry metadata the orchestrator needs
/// to decide on background revalidation.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue {
    pub data: Value,
    pub timestamp: i64,
    pub ttl: i64,
}

impl CachedValue {
    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis - self.timestamp > self.ttl
    }
}

impl From<&CacheEntry<Value>> for CachedValue {
    fn from(entry: &CacheEntry<Value>) -> Self {
        Self {
            data: entry.data.clone(),
            timestamp: entry.timestamp,
            ttl: entry.ttl,
        }
    }
}

/// Introspection row for [`crate::cache::StoreStats`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub key: String,
    /// Milliseconds since capture
    pub age: i64,
    /// Milliseconds of lifetime
    pub ttl: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_not_expired_at_ttl_boundary() {
        let entry = CacheEntry::new("k", 1, 1_000, 10_000);

        assert!(!entry.is_expired(10_000));
        assert!(!entry.is_expired(11_000));
        assert!(entry.is_expired(11_001));
    }

    #[test]
    fn test_entry_age() {
        let entry = CacheEntry::new("k", "v", 60_000, 5_000);
        assert_eq!(entry.age(7_500), 2_500);
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = CacheEntry::new("network_stats", json!({"level": 7}), 600_000, 42);
        let encoded = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            encoded,
            json!({
                "data": {"level": 7},
                "timestamp": 42,
                "ttl": 600_000,
                "key": "network_stats"
            })
        );

        let decoded: CacheEntry<Value> = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_cached_value_from_entry() {
        let entry = CacheEntry::new("k", json!([1, 2]), 100, 1_000);
        let cached = CachedValue::from(&entry);

        assert_eq!(cached.data, json!([1, 2]));
        assert!(!cached.is_expired(1_100));
        assert!(cached.is_expired(1_101));
    }
}
