//! Aggregate baker statistics

use serde::{Deserialize, Serialize};

use crate::client::{Baker, NetworkStats, YieldRates};

/// Delegation APY used when the yield source is unreachable (percent)
pub const DEFAULT_DELEGATION_APY: f64 = 3.5;

/// Staking APY used when the yield source is unreachable (percent)
pub const DEFAULT_STAKING_APY: f64 = 10.5;

/// Where the APY figures in [`BakersStats`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldSource {
    Live,
    Fallback,
}

/// Network-wide baking figures combined from several sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakersStats {
    /// Level of the network stats snapshot
    pub level: i64,
    pub total_bakers: usize,
    /// Mutez
    pub total_staking_balance: i64,
    /// Mutez, 0 without bakers
    pub average_staking_balance: i64,
    pub total_delegators: u64,
    /// Staked share of total supply, in percent
    pub staking_ratio: f64,
    pub delegation_apy: f64,
    pub staking_apy: f64,
    pub yield_source: YieldSource,
}

impl BakersStats {
    /// Combine the network snapshot, the baker list and (optionally) live
    /// yields. `None` yields fall back to the default APYs.
    pub fn compute(network: &NetworkStats, bakers: &[Baker], yields: Option<YieldRates>) -> Self {
        let total_bakers = bakers.len();
        let total_staking_balance: i64 = bakers.iter().map(|b| b.staking_balance).sum();
        let total_delegators: u64 = bakers.iter().map(|b| b.num_delegators as u64).sum();

        let average_staking_balance = if total_bakers == 0 {
            0
        } else {
            total_staking_balance / total_bakers as i64
        };

        let staking_ratio = if network.total_supply > 0 {
            total_staking_balance as f64 / network.total_supply as f64 * 100.0
        } else {
            0.0
        };

        let (delegation_apy, staking_apy, yield_source) = match yields {
            Some(rates) => (rates.delegation_apy, rates.staking_apy, YieldSource::Live),
            None => (
                DEFAULT_DELEGATION_APY,
                DEFAULT_STAKING_APY,
                YieldSource::Fallback,
            ),
        };

        Self {
            level: network.level,
            total_bakers,
            total_staking_balance,
            average_staking_balance,
            total_delegators,
            staking_ratio,
            delegation_apy,
            staking_apy,
            yield_source,
        }
    }
}
