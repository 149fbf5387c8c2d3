//! Domain façade over the cache and the remote collaborators
//!
//! Each method binds one indexer endpoint to one cache key and one policy.

pub mod invalidate;
pub mod latest;
pub mod stats;

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::cache::{CacheManager, CachePolicy, CacheStore, PreloadSummary, StoreStats, key};
use crate::client::{
    Baker, BakerListParams, BakerReward, Cycle, IndexerApi, NetworkStats, YieldApi,
};
use crate::error::{ApiError, Result};

pub use invalidate::InvalidationScope;
pub use latest::{BakerSelection, LatestRequest, Outcome};
pub use stats::{BakersStats, DEFAULT_DELEGATION_APY, DEFAULT_STAKING_APY, YieldSource};

/// Cached access to baking data.
///
/// Cheap to clone; clones share the collaborators and the store.
pub struct BakingService<I, Y> {
    indexer: Arc<I>,
    yields: Arc<Y>,
    cache: CacheManager,
}

impl<I, Y> Clone for BakingService<I, Y> {
    fn clone(&self) -> Self {
        Self {
            indexer: Arc::clone(&self.indexer),
            yields: Arc::clone(&self.yields),
            cache: self.cache.clone(),
        }
    }
}

impl<I, Y> BakingService<I, Y>
where
    I: IndexerApi + 'static,
    Y: YieldApi + 'static,
{
    pub fn new(indexer: Arc<I>, yields: Arc<Y>, store: Arc<CacheStore>) -> Self {
        Self {
            indexer,
            yields,
            cache: CacheManager::new(store),
        }
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        self.cache.store()
    }

    pub async fn network_stats(&self) -> Result<NetworkStats> {
        let indexer = Arc::clone(&self.indexer);
        self.cache
            .fetch_with_cache(key::NETWORK_STATS, &CachePolicy::NETWORK_STATS, move || {
                async move { indexer.network_stats().await }
            })
            .await
    }

    pub async fn current_cycle(&self) -> Result<Cycle> {
        let indexer = Arc::clone(&self.indexer);
        self.cache
            .fetch_with_cache(key::CURRENT_CYCLE, &CachePolicy::CURRENT_CYCLE, move || {
                async move { indexer.current_cycle().await }
            })
            .await
    }

    pub async fn bakers(&self, params: &BakerListParams) -> Result<Vec<Baker>> {
        let indexer = Arc::clone(&self.indexer);
        let owned = params.clone();
        self.cache
            .fetch_with_cache(&key::bakers_list(params), &CachePolicy::BAKERS_LIST, move || {
                async move { indexer.bakers(&owned).await }
            })
            .await
    }

    pub async fn baker_details(&self, address: &str) -> Result<Baker> {
        let address = validate_address(address)?.to_string();
        let indexer = Arc::clone(&self.indexer);
        self.cache
            .fetch_with_cache(
                &key::baker_details(&address),
                &CachePolicy::BAKER_DETAILS,
                move || async move { indexer.baker_details(&address).await },
            )
            .await
    }

    /// Reward history, most recent cycle first
    pub async fn baker_rewards(&self, address: &str, limit: u32) -> Result<Vec<BakerReward>> {
        let address = validate_address(address)?.to_string();
        let indexer = Arc::clone(&self.indexer);
        self.cache
            .fetch_with_cache(
                &key::baker_rewards(&address, limit),
                &CachePolicy::BAKER_REWARDS,
                move || async move { indexer.baker_rewards(&address, limit).await },
            )
            .await
    }

    /// Network-wide baking statistics.
    ///
    /// Indexer failures propagate. When the yield source fails the default
    /// APYs are used and the result is marked as a fallback.
    pub async fn bakers_stats(&self) -> Result<BakersStats> {
        let service = self.clone();
        self.cache
            .fetch_with_cache(key::BAKERS_STATS, &CachePolicy::BAKERS_STATS, move || {
                async move { service.compute_bakers_stats().await }
            })
            .await
    }

    async fn compute_bakers_stats(&self) -> Result<BakersStats> {
        let params = BakerListParams::default();
        let (network, bakers, yields) = tokio::join!(
            self.network_stats(),
            self.bakers(&params),
            self.yields.yield_rates(),
        );

        let yields = match yields {
            Ok(rates) => Some(rates),
            Err(e) => {
                log::debug!("Yield source unavailable, using defaults: {}", e);
                None
            }
        };

        Ok(BakersStats::compute(&network?, &bakers?, yields))
    }

    /// Warm the keys the overview screen needs. Individual failures are
    /// counted in the summary and never fail the call.
    pub async fn preload_critical(&self) -> PreloadSummary {
        let params = BakerListParams::default();
        let bakers_key = key::bakers_list(&params);

        let tasks: Vec<BoxFuture<'_, Result<()>>> = vec![
            self.cache
                .preload(key::NETWORK_STATS, &CachePolicy::NETWORK_STATS, || {
                    self.indexer.network_stats()
                })
                .map(|r| r.map(|_| ()))
                .boxed(),
            self.cache
                .preload(key::CURRENT_CYCLE, &CachePolicy::CURRENT_CYCLE, || {
                    self.indexer.current_cycle()
                })
                .map(|r| r.map(|_| ()))
                .boxed(),
            self.cache
                .preload(&bakers_key, &CachePolicy::BAKERS_LIST, || {
                    self.indexer.bakers(&params)
                })
                .map(|r| r.map(|_| ()))
                .boxed(),
        ];

        let summary = CacheManager::settle_all(tasks).await;
        log::debug!(
            "Preloaded {} keys ({} failed)",
            summary.succeeded,
            summary.failed
        );
        summary
    }

    pub fn cache_stats(&self) -> StoreStats {
        self.cache.stats()
    }

    /// Drop network-wide entries (stats, cycle, aggregates, every baker list)
    pub fn invalidate_network_cache(&self) -> Result<usize> {
        Ok(InvalidationScope::network()?.apply(self.store()))
    }

    /// Drop one baker's details and reward history
    pub fn invalidate_baker_cache(&self, address: &str) -> Result<usize> {
        let address = validate_address(address)?;
        Ok(InvalidationScope::baker(address)?.apply(self.store()))
    }

    pub fn invalidate_all(&self) {
        self.store().clear();
    }
}

/// Addresses end up in cache keys and URL paths, so only accept plain
/// base58-style tokens (ASCII letters and digits).
pub fn validate_address(address: &str) -> Result<&str> {
    let trimmed = address.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::InvalidAddress(address.to_string()).into());
    }
    Ok(trimmed)
}
