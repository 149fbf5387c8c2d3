//! Local cache for indexer responses
//!
//! An in-memory store with per-category TTL policies, an optional durable
//! mirror (SQLite for the CLI), and a stale-while-revalidate orchestrator
//! sitting between the façade and the remote indexer.

pub mod clock;
pub mod entry;
pub mod fetch;
pub mod key;
pub mod policy;
pub mod storage;
pub mod store;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, CachedValue, EntryInfo};
pub use fetch::{CacheManager, PreloadSummary};
pub use policy::{CachePolicy, DataCategory};
pub use storage::{DurableStorage, MemoryStorage, SqliteStorage, StorageStats};
pub use store::{CacheStore, DEFAULT_MAX_SIZE, StoreConfig, StoreStats};
