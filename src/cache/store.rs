//! In-memory cache store with an optional durable mirror
//!
//! Entries expire by TTL, the store is bounded by `max_size` (evicting the
//! entry with the oldest capture time), and entries whose policy asks for
//! persistence are mirrored into a [`DurableStorage`]. Durable failures never
//! surface: they are logged and the call continues as if persistence were
//! off.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::entry::{CacheEntry, CachedValue, EntryInfo};
use crate::cache::key::{STORAGE_PREFIX, storage_key};
use crate::cache::policy::CachePolicy;
use crate::cache::storage::DurableStorage;

/// Default bound on in-memory entries
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Store-wide settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub max_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// Snapshot returned by [`CacheStore::stats`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    /// `hits / (hits + misses)`, 0 before any access
    pub hit_rate: f64,
    pub entries: Vec<EntryInfo>,
}

#[derive(Debug)]
struct Slot {
    entry: CacheEntry<Value>,
    // Insertion order, breaks timestamp ties during eviction
    seq: u64,
}

#[derive(Debug, Default)]
struct StoreState {
    entries: HashMap<String, Slot>,
    next_seq: u64,
    durable: Option<Box<dyn DurableStorage>>,
}

/// Process-wide cache, constructed once by the composition root and shared
/// behind an `Arc`.
#[derive(Debug)]
pub struct CacheStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStore {
    pub fn new(config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Memory-only store on the system clock
    pub fn in_memory() -> Self {
        Self::new(StoreConfig::default(), Arc::new(SystemClock))
    }

    /// Attach a durable tier for entries whose policy persists
    pub fn with_durable(mut self, storage: impl DurableStorage + 'static) -> Self {
        let state = match self.state.get_mut() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.durable = Some(Box::new(storage));
        self
    }

    pub fn has_durable(&self) -> bool {
        self.lock().durable.is_some()
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Current time on the store's clock
    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Look up a key under a policy.
    ///
    /// Expired entries are returned as-is when the policy allows
    /// stale-while-revalidate; otherwise they are dropped from both tiers.
    pub fn get(&self, key: &str, policy: &CachePolicy) -> Option<Value> {
        self.get_with_meta(key, policy).map(|cached| cached.data)
    }

    /// Same lookup as [`CacheStore::get`], keeping capture time and TTL.
    pub fn get_with_meta(&self, key: &str, policy: &CachePolicy) -> Option<CachedValue> {
        let now = self.clock.now_millis();
        let mut state = self.lock();

        if let Some(slot) = state.entries.get(key) {
            if !slot.entry.is_expired(now) || policy.stale_while_revalidate {
                return Some(CachedValue::from(&slot.entry));
            }

            log::debug!("Cache entry expired: {}", key);
            state.entries.remove(key);
            state.durable_remove(key);
            return None;
        }

        if !policy.persist {
            return None;
        }

        let entry = state.durable_load(key)?;
        if entry.is_expired(now) {
            log::debug!("Durable cache entry expired: {}", key);
            state.durable_remove(key);
            return None;
        }

        log::debug!("Promoting durable cache entry: {}", key);
        let cached = CachedValue::from(&entry);
        state.insert(entry, self.config.max_size);
        Some(cached)
    }

    /// Store a value, replacing any previous entry for the key.
    pub fn set(&self, key: &str, data: Value, policy: &CachePolicy) {
        let entry = CacheEntry::new(key, data, policy.ttl_millis(), self.clock.now_millis());

        let encoded = if policy.persist {
            match serde_json::to_string(&entry) {
                Ok(json) => Some(json),
                Err(e) => {
                    log::debug!("Skipping durable write for {}: {}", key, e);
                    None
                }
            }
        } else {
            None
        };

        let mut state = self.lock();
        state.insert(entry, self.config.max_size);
        if let Some(json) = encoded {
            state.durable_write(key, &json);
        }
    }

    /// Remove one key from both tiers. Absent keys are fine.
    pub fn invalidate(&self, key: &str) {
        let mut state = self.lock();
        state.entries.remove(key);
        state.durable_remove(key);
    }

    /// Remove every key matching `pattern` from both tiers.
    ///
    /// Durable keys left over from earlier runs are matched too. Returns the
    /// number of distinct keys removed.
    pub fn invalidate_pattern(&self, pattern: &Regex) -> usize {
        let mut state = self.lock();

        let mut doomed: Vec<String> = state
            .entries
            .keys()
            .filter(|key| pattern.is_match(key))
            .cloned()
            .collect();

        let orphans: Vec<String> = state
            .durable_keys()
            .into_iter()
            .filter_map(|skey| skey.strip_prefix(STORAGE_PREFIX).map(str::to_string))
            .filter(|key| pattern.is_match(key) && !state.entries.contains_key(key))
            .collect();
        doomed.extend(orphans);

        for key in &doomed {
            state.entries.remove(key);
            state.durable_remove(key);
        }

        log::debug!("Invalidated {} entries matching {}", doomed.len(), pattern);
        doomed.len()
    }

    /// Empty memory and every prefixed durable key, including orphans from
    /// earlier runs.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();

        let durable_keys: Vec<String> = state
            .durable_keys()
            .into_iter()
            .filter(|skey| skey.starts_with(STORAGE_PREFIX))
            .collect();

        if let Some(storage) = state.durable.as_ref() {
            for skey in durable_keys {
                if let Err(e) = storage.remove(&skey) {
                    log::debug!("Failed to remove durable key {}: {}", skey, e);
                }
            }
        }
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stats(&self) -> StoreStats {
        let now = self.clock.now_millis();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        let state = self.lock();
        let mut entries: Vec<EntryInfo> = state
            .entries
            .values()
            .map(|slot| EntryInfo {
                key: slot.entry.key().to_string(),
                age: slot.entry.age(now),
                ttl: slot.entry.ttl(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        StoreStats {
            size: state.entries.len(),
            hits,
            misses,
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
            entries,
        }
    }

    /// Number of in-memory entries
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the key is held in memory, expired or not
    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // Every mutation leaves the map consistent, so a poisoned lock is
        // still usable.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StoreState {
    fn insert(&mut self, entry: CacheEntry<Value>, max_size: usize) {
        if !self.entries.contains_key(entry.key()) && self.entries.len() >= max_size {
            self.evict_oldest();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries
            .insert(entry.key().to_string(), Slot { entry, seq });
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, slot)| (slot.entry.timestamp(), slot.seq))
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            log::debug!("Evicting oldest cache entry: {}", key);
            self.entries.remove(&key);
            self.durable_remove(&key);
        }
    }

    fn durable_load(&self, key: &str) -> Option<CacheEntry<Value>> {
        let storage = self.durable.as_ref()?;
        let skey = storage_key(key);

        let raw = match storage.get(&skey) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::debug!("Durable read failed for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry<Value>>(&raw) {
            Ok(entry) if entry.key() == key => Some(entry),
            Ok(entry) => {
                log::warn!(
                    "Durable entry {} holds key {}, discarding",
                    skey,
                    entry.key()
                );
                let _ = storage.remove(&skey);
                None
            }
            Err(e) => {
                log::warn!("Undecodable durable entry {}: {}", skey, e);
                let _ = storage.remove(&skey);
                None
            }
        }
    }

    fn durable_write(&self, key: &str, json: &str) {
        if let Some(storage) = self.durable.as_ref()
            && let Err(e) = storage.set(&storage_key(key), json)
        {
            log::debug!("Durable write failed for {}: {}", key, e);
        }
    }

    fn durable_remove(&self, key: &str) {
        if let Some(storage) = self.durable.as_ref()
            && let Err(e) = storage.remove(&storage_key(key))
        {
            log::debug!("Durable remove failed for {}: {}", key, e);
        }
    }

    fn durable_keys(&self) -> Vec<String> {
        match self.durable.as_ref().map(|storage| storage.keys()) {
            Some(Ok(keys)) => keys,
            Some(Err(e)) => {
                log::debug!("Durable key listing failed: {}", e);
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}
