//! Remote collaborators: the chain indexer and the yield source

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod tzkt;
pub mod yields;

#[cfg(test)]
pub use mock::{MockIndexer, MockYields};
pub use models::{
    Baker, BakerListParams, BakerReward, Cycle, MUTEZ_PER_TEZ, NetworkStats, SortOrder, YieldRates,
};
pub use tzkt::{DEFAULT_API_URL, TzktClient};
pub use yields::YieldClient;

/// Chain indexer (TzKT or compatible)
#[async_trait]
pub trait IndexerApi: Send + Sync {
    /// Current network statistics
    async fn network_stats(&self) -> Result<NetworkStats>;

    /// The cycle in progress
    async fn current_cycle(&self) -> Result<Cycle>;

    /// Baker list, sorted and filtered by `params`
    async fn bakers(&self, params: &BakerListParams) -> Result<Vec<Baker>>;

    async fn baker_details(&self, address: &str) -> Result<Baker>;

    /// Most recent reward cycles first
    async fn baker_rewards(&self, address: &str, limit: u32) -> Result<Vec<BakerReward>>;
}

/// Source of live APY figures used to enrich baker statistics
#[async_trait]
pub trait YieldApi: Send + Sync {
    async fn yield_rates(&self) -> Result<YieldRates>;
}
