//! Cache-first fetching with stale-while-revalidate
//!
//! [`CacheManager`] wraps a remote call: hits return immediately, stale hits
//! under a revalidating policy also spawn one detached refresh, and misses
//! await the call, store its result and return it.

use futures::future::{BoxFuture, join_all};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

use crate::cache::policy::CachePolicy;
use crate::cache::store::{CacheStore, StoreStats};
use crate::error::Result;

/// Orchestrates store lookups, remote calls and hit/miss accounting.
///
/// Cheap to clone; clones share the same store.
#[derive(Debug, Clone)]
pub struct CacheManager {
    store: Arc<CacheStore>,
}

/// Outcome of [`CacheManager::settle_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl CacheManager {
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    /// Return cached data for `key`, or fetch, store and return it.
    ///
    /// When the policy allows stale-while-revalidate and the cached entry
    /// has expired, the stale value is returned and `fetch` runs once in the
    /// background; its result replaces the entry on success and is dropped
    /// on failure. Remote errors only reach the caller on a genuine miss.
    ///
    /// The background refresh is a `tokio::spawn`, so it needs a tokio
    /// runtime. On any other executor a stale value is still returned but
    /// is not refreshed.
    pub async fn fetch_with_cache<T, F, Fut>(
        &self,
        key: &str,
        policy: &CachePolicy,
        fetch: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        if let Some(cached) = self.store.get_with_meta(key, policy) {
            let stale = cached.is_expired(self.store.now());
            match serde_json::from_value::<T>(cached.data) {
                Ok(value) => {
                    self.store.record_hit();
                    if policy.stale_while_revalidate && stale {
                        log::debug!("Cache hit (stale): {}", key);
                        self.revalidate(key, *policy, fetch);
                    } else {
                        log::debug!("Cache hit: {}", key);
                    }
                    return Ok(value);
                }
                Err(e) => {
                    log::warn!("Discarding cached {} that no longer decodes: {}", key, e);
                    self.store.invalidate(key);
                }
            }
        }

        self.fetch_and_store(key, policy, fetch).await
    }

    /// Warm one key: cached data is returned as-is (no refresh), otherwise
    /// the value is fetched and stored.
    pub async fn preload<T, F, Fut>(&self, key: &str, policy: &CachePolicy, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(data) = self.store.get(key, policy) {
            match serde_json::from_value::<T>(data) {
                Ok(value) => {
                    self.store.record_hit();
                    log::debug!("Preload already cached: {}", key);
                    return Ok(value);
                }
                Err(e) => {
                    log::warn!("Discarding cached {} that no longer decodes: {}", key, e);
                    self.store.invalidate(key);
                }
            }
        }

        self.fetch_and_store(key, policy, fetch).await
    }

    /// Run every task to completion. A failing task is counted and logged;
    /// it never cancels or fails its siblings.
    pub async fn settle_all(tasks: Vec<BoxFuture<'_, Result<()>>>) -> PreloadSummary {
        let results = join_all(tasks).await;

        let mut summary = PreloadSummary::default();
        for result in results {
            match result {
                Ok(()) => summary.succeeded += 1,
                Err(e) => {
                    log::debug!("Preload failed: {}", e);
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    async fn fetch_and_store<T, F, Fut>(&self, key: &str, policy: &CachePolicy, fetch: F) -> Result<T>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.store.record_miss();
        log::debug!("Cache miss: {}", key);

        let value = fetch().await?;
        store_value(&self.store, key, &value, policy);
        Ok(value)
    }

    fn revalidate<T, F, Fut>(&self, key: &str, policy: CachePolicy, fetch: F)
    where
        T: Serialize + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::debug!("No tokio runtime, skipping revalidation of {}", key);
            return;
        };
        let store = Arc::clone(&self.store);
        let key = key.to_string();

        runtime.spawn(async move {
            match fetch().await {
                Ok(value) => {
                    store_value(&store, &key, &value, &policy);
                    log::debug!("Background revalidation refreshed {}", key);
                }
                Err(e) => log::debug!("Background revalidation failed for {}: {}", key, e),
            }
        });
    }
}

fn store_value<T: Serialize>(store: &CacheStore, key: &str, value: &T, policy: &CachePolicy) {
    match serde_json::to_value(value) {
        Ok(data) => store.set(key, data, policy),
        Err(e) => log::warn!("Not caching {}: {}", key, e),
    }
}
