//! Declarative invalidation scopes
//!
//! Each scope lists the exact keys and key patterns it removes. Scopes are
//! applied to the store as a unit.

use regex::Regex;

use crate::cache::{CacheStore, key};

/// Keys and patterns removed together
#[derive(Debug, Clone)]
pub struct InvalidationScope {
    pub keys: Vec<String>,
    pub patterns: Vec<Regex>,
}

impl InvalidationScope {
    /// Everything derived from network-wide state
    pub fn network() -> Result<Self, regex::Error> {
        Ok(Self {
            keys: vec![
                key::NETWORK_STATS.to_string(),
                key::CURRENT_CYCLE.to_string(),
                key::BAKERS_STATS.to_string(),
            ],
            patterns: vec![key::bakers_list_pattern()?],
        })
    }

    /// Details and every reward history page for one baker
    pub fn baker(address: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            keys: vec![key::baker_details(address)],
            patterns: vec![key::baker_rewards_pattern(address)?],
        })
    }

    /// Remove every key and pattern match from `store`. Returns the number
    /// of pattern matches removed; exact keys are removed whether or not
    /// they were present.
    pub fn apply(&self, store: &CacheStore) -> usize {
        for key in &self.keys {
            store.invalidate(key);
        }
        self.patterns
            .iter()
            .map(|pattern| store.invalidate_pattern(pattern))
            .sum()
    }
}
