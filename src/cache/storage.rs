//! Durable second tier for cache entries
//!
//! The store only needs a synchronous key/value text-blob facility. Two
//! backends are provided: SQLite with file blobs for large payloads (the
//! CLI's on-disk cache) and a shared in-process map.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::cache::key::blob_name;
use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

/// Payloads larger than this are stored as external blobs
const INLINE_THRESHOLD: usize = 10 * 1024; // 10KB

type Result<T> = std::result::Result<T, CacheError>;

/// Key/value text storage backing the durable cache tier.
///
/// Implementations may fail at any call; the store treats every error as
/// "persistence skipped".
pub trait DurableStorage: Send + Debug {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Every key currently stored, including ones written by earlier runs
    fn keys(&self) -> Result<Vec<String>>;
}

/// SQLite-backed storage with file blob support
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
    blobs_dir: PathBuf,
}

impl SqliteStorage {
    /// Open or create storage at the default XDG cache location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Get the cache directory path (~/.cache/tezbake on Linux)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("tezbake"))
    }

    /// Open storage at a specific directory
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join("cache.db");
        let blobs_dir = cache_dir.join("blobs");
        std::fs::create_dir_all(&blobs_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create blobs dir: {}", e)))?;

        let conn = Connection::open(&db_path)?;

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            Self::nuke(&db_path, &blobs_dir)?;
            return Self::open_at(cache_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS durable_entries (
                storage_key TEXT PRIMARY KEY NOT NULL,
                data TEXT,
                blob_path TEXT,
                size_bytes INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn, blobs_dir })
    }

    /// Summary of what is on disk, for `cache status`
    pub fn stats(&self) -> Result<StorageStats> {
        let (entries, total_size, newest): (i64, i64, Option<i64>) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(size_bytes), 0), MAX(updated_at) FROM durable_entries",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )?;

        let blob_entries: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM durable_entries WHERE blob_path IS NOT NULL",
            [],
            |r| r.get(0),
        )?;

        Ok(StorageStats {
            entries: entries as usize,
            blob_entries: blob_entries as usize,
            total_size_bytes: total_size as usize,
            newest_write: newest,
        })
    }

    fn existing_blob(&self, key: &str) -> Result<Option<String>> {
        let blob_path: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT blob_path FROM durable_entries WHERE storage_key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(blob_path.flatten())
    }

    fn remove_blob(&self, rel_path: &str) {
        let full_path = self.blobs_dir.join(rel_path);
        if let Err(e) = std::fs::remove_file(&full_path) {
            log::debug!("Failed to remove blob {}: {}", rel_path, e);
        }
    }

    /// Write a blob file, sharded by first 2 chars of the hashed key
    fn write_blob(&self, key: &str, data: &[u8]) -> Result<String> {
        let name = blob_name(key);
        let shard = &name[..2];
        let shard_dir = self.blobs_dir.join(shard);
        std::fs::create_dir_all(&shard_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create shard dir: {}", e)))?;

        let filename = format!("{}.json", name);
        let rel_path = format!("{}/{}", shard, filename);

        std::fs::write(shard_dir.join(&filename), data)
            .map_err(|e| CacheError::Io(format!("Failed to write blob: {}", e)))?;

        Ok(rel_path)
    }

    /// Nuke the cache (delete DB and all blobs)
    fn nuke(db_path: &Path, blobs_dir: &Path) -> Result<()> {
        if db_path.exists() {
            std::fs::remove_file(db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
        }
        if blobs_dir.exists() {
            std::fs::remove_dir_all(blobs_dir)
                .map_err(|e| CacheError::Io(format!("Failed to remove blobs dir: {}", e)))?;
        }
        Ok(())
    }
}

impl DurableStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let result: Option<(Option<String>, Option<String>)> = self
            .conn
            .query_row(
                "SELECT data, blob_path FROM durable_entries WHERE storage_key = ?1",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match result {
            Some((Some(data), None)) => Ok(Some(data)),
            Some((None, Some(blob_path))) => {
                match std::fs::read_to_string(self.blobs_dir.join(&blob_path)) {
                    Ok(data) => Ok(Some(data)),
                    Err(e) => {
                        log::warn!("Failed to read blob {}: {}", blob_path, e);
                        // Row without its blob is useless
                        let _ = self
                            .conn
                            .execute("DELETE FROM durable_entries WHERE storage_key = ?1", [key]);
                        Ok(None)
                    }
                }
            }
            _ => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().timestamp();
        let previous_blob = self.existing_blob(key)?;

        if value.len() <= INLINE_THRESHOLD {
            self.conn.execute(
                "INSERT OR REPLACE INTO durable_entries
                 (storage_key, data, blob_path, size_bytes, updated_at)
                 VALUES (?1, ?2, NULL, ?3, ?4)",
                params![key, value, value.len(), now],
            )?;
            if let Some(rel_path) = previous_blob {
                self.remove_blob(&rel_path);
            }
        } else {
            let blob_path = self.write_blob(key, value.as_bytes())?;
            self.conn.execute(
                "INSERT OR REPLACE INTO durable_entries
                 (storage_key, data, blob_path, size_bytes, updated_at)
                 VALUES (?1, NULL, ?2, ?3, ?4)",
                params![key, blob_path, value.len(), now],
            )?;
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let previous_blob = self.existing_blob(key)?;
        self.conn
            .execute("DELETE FROM durable_entries WHERE storage_key = ?1", [key])?;
        if let Some(rel_path) = previous_blob {
            self.remove_blob(&rel_path);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT storage_key FROM durable_entries")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

/// Statistics about the on-disk tier
#[derive(Debug)]
pub struct StorageStats {
    pub entries: usize,
    pub blob_entries: usize,
    pub total_size_bytes: usize,
    /// Unix seconds of the most recent write
    pub newest_write: Option<i64>,
}

/// In-process storage. Clones share the same map, which lets tests model a
/// restart by building a second store over the same backing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|m| m.contains_key(key))
            .unwrap_or(false)
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.entries.lock().map_err(|_| CacheError::Unavailable)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.entries.lock().map_err(|_| CacheError::Unavailable)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self.entries.lock().map_err(|_| CacheError::Unavailable)?;
        guard.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let guard = self.entries.lock().map_err(|_| CacheError::Unavailable)?;
        Ok(guard.keys().cloned().collect())
    }
}
