//! Cache key derivation
//!
//! Keys stay human-readable (`baker_rewards_<address>_<limit>`) so pattern
//! invalidation can target one baker's history. Blob file names in the
//! durable tier use a SHA-256 of the key instead, since addresses and sort
//! fields are not guaranteed to be filesystem-safe.

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::client::BakerListParams;

/// Prefix shared by every key mirrored into durable storage
pub const STORAGE_PREFIX: &str = "tezbake_cache_";

pub const NETWORK_STATS: &str = "network_stats";
pub const CURRENT_CYCLE: &str = "current_cycle";
pub const BAKERS_STATS: &str = "bakers_stats";
pub const BAKERS_LIST_PREFIX: &str = "bakers_list_";

pub fn bakers_list(params: &BakerListParams) -> String {
    format!(
        "{}{}_{}_{}_{}",
        BAKERS_LIST_PREFIX,
        params.sort_by,
        params.order.as_str(),
        if params.active_only { "active" } else { "all" },
        params.limit
    )
}

pub fn baker_details(address: &str) -> String {
    format!("baker_details_{}", address)
}

pub fn baker_rewards(address: &str, limit: u32) -> String {
    format!("baker_rewards_{}_{}", address, limit)
}

/// Pattern matching every reward-history key for one address, whatever the
/// limit. The address is escaped before it is embedded.
pub fn baker_rewards_pattern(address: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^baker_rewards_{}_", regex::escape(address)))
}

pub fn bakers_list_pattern() -> Result<Regex, regex::Error> {
    Regex::new(&format!("^{}", regex::escape(BAKERS_LIST_PREFIX)))
}

/// Durable-tier key for a cache key
pub fn storage_key(key: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, key)
}

/// Hex SHA-256 of a key, used for blob file names
pub fn blob_name(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}
