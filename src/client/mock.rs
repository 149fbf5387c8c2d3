//! Mock collaborators for testing
//!
//! In-memory implementations of `IndexerApi` and `YieldApi` with call
//! counters, injectable failures and per-address delays.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::fixtures::{BakerBuilder, CycleBuilder, NetworkStatsBuilder};
use super::models::{Baker, BakerListParams, BakerReward, Cycle, NetworkStats, YieldRates};
use super::{IndexerApi, YieldApi};
use crate::error::{ApiError, Result};

/// Tracks indexer call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub network_stats: usize,
    pub current_cycle: usize,
    pub bakers: usize,
    pub baker_details: usize,
    pub baker_rewards: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.network_stats
            + self.current_cycle
            + self.bakers
            + self.baker_details
            + self.baker_rewards
    }
}

/// Mock indexer.
///
/// # Example
/// ```ignore
/// let mock = MockIndexer::new()
///     .with_bakers(vec![BakerBuilder::new("tz1abc").build()])
///     .await;
/// let bakers = mock.bakers(&BakerListParams::default()).await?;
/// ```
pub struct MockIndexer {
    network_stats: Arc<Mutex<NetworkStats>>,
    cycle: Arc<Mutex<Option<Cycle>>>,
    bakers: Arc<Mutex<Vec<Baker>>>,
    rewards: Arc<Mutex<Vec<BakerReward>>>,
    /// Address -> artificial latency for baker_details
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    /// Error to return on the next call, consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// When set, every call fails with this HTTP status
    failing_status: Arc<Mutex<Option<u16>>>,
    call_count: Arc<Mutex<CallCounts>>,
}

impl Default for MockIndexer {
    fn default() -> Self {
        Self {
            network_stats: Arc::new(Mutex::new(NetworkStatsBuilder::new().build())),
            cycle: Arc::new(Mutex::new(Some(CycleBuilder::new(800).build()))),
            bakers: Arc::new(Mutex::new(Vec::new())),
            rewards: Arc::new(Mutex::new(Vec::new())),
            delays: Arc::new(Mutex::new(HashMap::new())),
            error: Arc::new(Mutex::new(None)),
            failing_status: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
        }
    }
}

impl MockIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_network_stats(self, stats: NetworkStats) -> Self {
        *self.network_stats.lock().await = stats;
        self
    }

    /// Replace the network stats served from now on
    pub async fn set_network_stats(&self, stats: NetworkStats) {
        *self.network_stats.lock().await = stats;
    }

    pub async fn with_cycle(self, cycle: Option<Cycle>) -> Self {
        *self.cycle.lock().await = cycle;
        self
    }

    /// Bakers served by both the list and the details endpoint
    pub async fn with_bakers(self, bakers: Vec<Baker>) -> Self {
        *self.bakers.lock().await = bakers;
        self
    }

    pub async fn with_rewards(self, rewards: Vec<BakerReward>) -> Self {
        *self.rewards.lock().await = rewards;
        self
    }

    /// Delay `baker_details(address)` by `delay`
    pub async fn with_delay(self, address: &str, delay: Duration) -> Self {
        self.delays.lock().await.insert(address.to_string(), delay);
        self
    }

    /// Fail the next call with `error`
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Fail every call with `status` until cleared with `None`
    pub async fn set_failing(&self, status: Option<u16>) {
        *self.failing_status.lock().await = status;
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    async fn check_error(&self, endpoint: &str) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        if let Some(status) = *self.failing_status.lock().await {
            return Err(ApiError::Http {
                endpoint: endpoint.to_string(),
                status,
                reason: "Mock failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl IndexerApi for MockIndexer {
    async fn network_stats(&self) -> Result<NetworkStats> {
        self.call_count.lock().await.network_stats += 1;
        self.check_error("/statistics/current").await?;
        Ok(self.network_stats.lock().await.clone())
    }

    async fn current_cycle(&self) -> Result<Cycle> {
        self.call_count.lock().await.current_cycle += 1;
        self.check_error("/cycles").await?;
        self.cycle
            .lock()
            .await
            .clone()
            .ok_or_else(|| ApiError::NoCurrentCycle.into())
    }

    async fn bakers(&self, params: &BakerListParams) -> Result<Vec<Baker>> {
        self.call_count.lock().await.bakers += 1;
        self.check_error("/delegates").await?;

        let bakers = self.bakers.lock().await;
        Ok(bakers
            .iter()
            .filter(|b| !params.active_only || b.active)
            .take(params.limit as usize)
            .cloned()
            .collect())
    }

    async fn baker_details(&self, address: &str) -> Result<Baker> {
        self.call_count.lock().await.baker_details += 1;
        let endpoint = format!("/delegates/{}", address);

        let delay = self.delays.lock().await.get(address).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_error(&endpoint).await?;

        let bakers = self.bakers.lock().await;
        match bakers.iter().find(|b| b.address == address) {
            Some(baker) => Ok(baker.clone()),
            None if address.starts_with("tz") => Ok(BakerBuilder::new(address).build()),
            None => Err(ApiError::Http {
                endpoint,
                status: 404,
                reason: "Not Found".to_string(),
            }
            .into()),
        }
    }

    async fn baker_rewards(&self, address: &str, limit: u32) -> Result<Vec<BakerReward>> {
        self.call_count.lock().await.baker_rewards += 1;
        self.check_error(&format!("/rewards/bakers/{}", address))
            .await?;

        let rewards = self.rewards.lock().await;
        Ok(rewards.iter().take(limit as usize).cloned().collect())
    }
}

/// Mock yield source
pub struct MockYields {
    rates: Arc<Mutex<Option<YieldRates>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockYields {
    /// Serves `delegation_apy` and `staking_apy`
    pub fn new(delegation_apy: f64, staking_apy: f64) -> Self {
        Self {
            rates: Arc::new(Mutex::new(Some(YieldRates {
                delegation_apy,
                staking_apy,
            }))),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Fails every call
    pub fn unavailable() -> Self {
        Self {
            rates: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub async fn calls(&self) -> usize {
        *self.calls.lock().await
    }
}

#[async_trait]
impl YieldApi for MockYields {
    async fn yield_rates(&self) -> Result<YieldRates> {
        *self.calls.lock().await += 1;
        self.rates.lock().await.ok_or_else(|| {
            ApiError::Http {
                endpoint: "/yields".to_string(),
                status: 503,
                reason: "Service Unavailable".to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockIndexer::new();
        mock.network_stats().await.unwrap();
        mock.network_stats().await.unwrap();
        mock.current_cycle().await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.network_stats, 2);
        assert_eq!(counts.current_cycle, 1);
        assert_eq!(counts.total(), 3);
    }

    #[tokio::test]
    async fn test_mock_one_shot_error() {
        let mock = MockIndexer::new()
            .with_error(ApiError::Network("down".to_string()))
            .await;

        assert!(mock.network_stats().await.is_err());
        assert!(mock.network_stats().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_bakers_filter_and_limit() {
        let mock = MockIndexer::new()
            .with_bakers(vec![
                BakerBuilder::new("tz1a").build(),
                BakerBuilder::new("tz1b").inactive().build(),
                BakerBuilder::new("tz1c").build(),
            ])
            .await;

        let active = mock.bakers(&BakerListParams::default()).await.unwrap();
        assert_eq!(active.len(), 2);

        let one = mock
            .bakers(&BakerListParams::default().active_only(false).limit(1))
            .await
            .unwrap();
        assert_eq!(one.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_unknown_address_is_404() {
        let mock = MockIndexer::new();
        let err = mock.baker_details("KT1nope").await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_mock_yields_unavailable() {
        let yields = MockYields::unavailable();
        assert!(yields.yield_rates().await.is_err());
        assert_eq!(yields.calls().await, 1);
    }
}
