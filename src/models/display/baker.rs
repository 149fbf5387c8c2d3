//! Baker display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_tez, truncate_string};
use crate::client::{Baker, BakerReward};

/// Baker row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct BakerDisplay {
    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "STAKING BALANCE")]
    pub staking_balance: String,

    #[tabled(rename = "DELEGATORS")]
    pub delegators: u32,

    #[tabled(rename = "ACTIVE")]
    pub active: String,
}

impl From<&Baker> for BakerDisplay {
    fn from(baker: &Baker) -> Self {
        Self {
            address: baker.address.clone(),
            name: truncate_string(baker.alias.as_deref().unwrap_or("-"), 30),
            staking_balance: format_tez(baker.staking_balance),
            delegators: baker.num_delegators,
            active: if baker.active { "yes" } else { "no" }.to_string(),
        }
    }
}

/// One reward cycle for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RewardDisplay {
    #[tabled(rename = "CYCLE")]
    pub cycle: i32,

    #[tabled(rename = "BLOCKS")]
    pub blocks: u32,

    #[tabled(rename = "MISSED")]
    pub missed_blocks: u32,

    #[tabled(rename = "EXPECTED")]
    pub expected_blocks: String,

    #[tabled(rename = "REWARDS")]
    pub rewards: String,
}

impl From<&BakerReward> for RewardDisplay {
    fn from(reward: &BakerReward) -> Self {
        Self {
            cycle: reward.cycle,
            blocks: reward.blocks,
            missed_blocks: reward.missed_blocks,
            expected_blocks: format!("{:.2}", reward.expected_blocks),
            rewards: format_tez(reward.total_rewards()),
        }
    }
}
