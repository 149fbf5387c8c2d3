//! Cache entry display model

use serde::Serialize;
use tabled::Tabled;

use super::common::format_millis;
use crate::cache::EntryInfo;

/// In-memory cache entry for `cache status` tables.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CacheEntryDisplay {
    #[tabled(rename = "KEY")]
    pub key: String,

    #[tabled(rename = "AGE")]
    pub age: String,

    #[tabled(rename = "TTL")]
    pub ttl: String,

    #[tabled(rename = "STATE")]
    pub state: String,
}

impl From<&EntryInfo> for CacheEntryDisplay {
    fn from(info: &EntryInfo) -> Self {
        Self {
            key: info.key.clone(),
            age: format_millis(info.age),
            ttl: format_millis(info.ttl),
            state: if info.age > info.ttl { "stale" } else { "fresh" }.to_string(),
        }
    }
}
