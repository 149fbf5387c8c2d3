//! Test fixtures and builders for indexer model types
//!
//! Builders start from plausible mainnet-shaped values so tests only spell
//! out the fields they care about. Import via `use crate::client::fixtures::*`.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use super::models::{Baker, BakerReward, Cycle, NetworkStats};

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

// ============================================================================
// NetworkStatsBuilder
// ============================================================================

/// Builder for `NetworkStats`.
#[derive(Debug, Clone)]
pub struct NetworkStatsBuilder {
    level: i64,
    cycle: Option<i32>,
    total_supply: i64,
    circulating_supply: i64,
    total_frozen: i64,
}

impl Default for NetworkStatsBuilder {
    fn default() -> Self {
        Self {
            level: 7_000_000,
            cycle: Some(800),
            total_supply: 1_000_000_000_000_000,
            circulating_supply: 990_000_000_000_000,
            total_frozen: 0,
        }
    }
}

impl NetworkStatsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: i64) -> Self {
        self.level = level;
        self
    }

    pub fn cycle(mut self, cycle: i32) -> Self {
        self.cycle = Some(cycle);
        self
    }

    /// Total supply in mutez
    pub fn total_supply(mut self, mutez: i64) -> Self {
        self.total_supply = mutez;
        self
    }

    pub fn build(self) -> NetworkStats {
        NetworkStats {
            level: self.level,
            timestamp: fixed_time(),
            cycle: self.cycle,
            total_supply: self.total_supply,
            circulating_supply: self.circulating_supply,
            total_frozen: self.total_frozen,
            total_burned: 0,
            total_created: 0,
        }
    }
}

// ============================================================================
// CycleBuilder
// ============================================================================

/// Builder for `Cycle`.
#[derive(Debug, Clone)]
pub struct CycleBuilder {
    index: i32,
    first_level: i64,
    last_level: i64,
}

impl CycleBuilder {
    pub fn new(index: i32) -> Self {
        let first_level = 1 + index as i64 * 10_800;
        Self {
            index,
            first_level,
            last_level: first_level + 10_799,
        }
    }

    pub fn levels(mut self, first: i64, last: i64) -> Self {
        self.first_level = first;
        self.last_level = last;
        self
    }

    pub fn build(self) -> Cycle {
        Cycle {
            index: self.index,
            first_level: self.first_level,
            start_time: fixed_time(),
            last_level: self.last_level,
            end_time: fixed_time() + chrono::Duration::days(1),
            total_bakers: 300,
            total_baking_power: 0,
        }
    }
}

// ============================================================================
// BakerBuilder
// ============================================================================

/// Builder for `Baker`.
///
/// # Example
/// ```ignore
/// let baker = BakerBuilder::new("tz1abc")
///     .alias("Example")
///     .staking_balance(100_000_000_000)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct BakerBuilder {
    address: String,
    alias: Option<String>,
    active: bool,
    staking_balance: i64,
    num_delegators: u32,
}

impl BakerBuilder {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            alias: None,
            active: true,
            staking_balance: 10_000_000_000,
            num_delegators: 10,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Staking balance in mutez
    pub fn staking_balance(mut self, mutez: i64) -> Self {
        self.staking_balance = mutez;
        self
    }

    pub fn num_delegators(mut self, count: u32) -> Self {
        self.num_delegators = count;
        self
    }

    pub fn build(self) -> Baker {
        Baker {
            address: self.address,
            alias: self.alias,
            active: self.active,
            balance: self.staking_balance / 10,
            staking_balance: self.staking_balance,
            delegated_balance: self.staking_balance / 2,
            num_delegators: self.num_delegators,
            stakers_count: 0,
            last_activity_time: Some(fixed_time()),
        }
    }
}

/// Reward history for `count` cycles, newest first
pub fn rewards(latest_cycle: i32, count: u32) -> Vec<BakerReward> {
    (0..count as i32)
        .map(|i| BakerReward {
            cycle: latest_cycle - i,
            baking_power: 10_000_000_000,
            expected_blocks: 2.5,
            expected_endorsements: 800.0,
            blocks: 2,
            missed_blocks: 0,
            block_rewards_delegated: 20_000_000,
            block_rewards_staked_own: 5_000_000,
            endorsement_rewards_delegated: 30_000_000,
            endorsement_rewards_staked_own: 7_000_000,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_produce_consistent_values() {
        let baker = BakerBuilder::new("tz1abc").alias("A").build();
        assert_eq!(baker.display_name(), "A");
        assert!(baker.active);

        let cycle = CycleBuilder::new(2).build();
        assert_eq!(cycle.last_level - cycle.first_level + 1, 10_800);

        let history = rewards(800, 3);
        assert_eq!(
            history.iter().map(|r| r.cycle).collect::<Vec<_>>(),
            vec![800, 799, 798]
        );
    }
}
