//! Baker (delegate) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A baker as returned by `/delegates`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baker {
    pub address: String,

    #[serde(default)]
    pub alias: Option<String>,

    #[serde(default)]
    pub active: bool,

    /// Spendable balance in mutez
    #[serde(default)]
    pub balance: i64,

    /// Own stake plus external stake and delegations, in mutez
    #[serde(default)]
    pub staking_balance: i64,

    #[serde(default)]
    pub delegated_balance: i64,

    #[serde(default)]
    pub num_delegators: u32,

    #[serde(default)]
    pub stakers_count: u32,

    #[serde(default)]
    pub last_activity_time: Option<DateTime<Utc>>,
}

impl Baker {
    /// Alias when the indexer knows one, otherwise the address
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.address)
    }
}

/// One cycle of a baker's reward history (`/rewards/bakers/<address>`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakerReward {
    pub cycle: i32,

    #[serde(default)]
    pub baking_power: i64,

    #[serde(default)]
    pub expected_blocks: f64,

    #[serde(default)]
    pub expected_endorsements: f64,

    #[serde(default)]
    pub blocks: u32,

    #[serde(default)]
    pub missed_blocks: u32,

    #[serde(default)]
    pub block_rewards_delegated: i64,

    #[serde(default)]
    pub block_rewards_staked_own: i64,

    #[serde(default)]
    pub endorsement_rewards_delegated: i64,

    #[serde(default)]
    pub endorsement_rewards_staked_own: i64,
}

impl BakerReward {
    /// Sum of the block and endorsement reward fields, in mutez
    pub fn total_rewards(&self) -> i64 {
        self.block_rewards_delegated
            + self.block_rewards_staked_own
            + self.endorsement_rewards_delegated
            + self.endorsement_rewards_staked_own
    }
}

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query parameters for the baker list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BakerListParams {
    /// Indexer field to sort by (e.g. `stakingBalance`)
    pub sort_by: String,
    pub order: SortOrder,
    pub active_only: bool,
    pub limit: u32,
}

impl Default for BakerListParams {
    fn default() -> Self {
        Self {
            sort_by: "stakingBalance".to_string(),
            order: SortOrder::Desc,
            active_only: true,
            limit: 100,
        }
    }
}

impl BakerListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = field.into();
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn active_only(mut self, active_only: bool) -> Self {
        self.active_only = active_only;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Convert to query parameters for the HTTP request
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(3);
        if self.active_only {
            query.push(("active".to_string(), "true".to_string()));
        }
        query.push((format!("sort.{}", self.order.as_str()), self.sort_by.clone()));
        query.push(("limit".to_string(), self.limit.to_string()));
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baker_from_indexer_json() {
        let json = r#"{
            "type": "delegate",
            "address": "tz1abc",
            "alias": "Example Baker",
            "active": true,
            "balance": 1000000,
            "stakingBalance": 50000000000,
            "delegatedBalance": 40000000000,
            "numDelegators": 42,
            "stakersCount": 3,
            "lastActivityTime": "2025-01-01T00:00:00Z"
        }"#;

        let baker: Baker = serde_json::from_str(json).unwrap();

        assert_eq!(baker.display_name(), "Example Baker");
        assert_eq!(baker.staking_balance, 50_000_000_000);
        assert_eq!(baker.num_delegators, 42);
    }

    #[test]
    fn test_baker_display_name_falls_back_to_address() {
        let baker: Baker = serde_json::from_str(r#"{"address": "tz1xyz"}"#).unwrap();
        assert_eq!(baker.display_name(), "tz1xyz");
        assert!(!baker.active);
    }

    #[test]
    fn test_reward_total() {
        let reward: BakerReward = serde_json::from_str(
            r#"{
                "cycle": 800,
                "blockRewardsDelegated": 10,
                "blockRewardsStakedOwn": 20,
                "endorsementRewardsDelegated": 30,
                "endorsementRewardsStakedOwn": 40
            }"#,
        )
        .unwrap();
        assert_eq!(reward.total_rewards(), 100);
    }

    #[test]
    fn test_list_params_default_query() {
        let query = BakerListParams::default().to_query();
        assert_eq!(
            query,
            vec![
                ("active".to_string(), "true".to_string()),
                ("sort.desc".to_string(), "stakingBalance".to_string()),
                ("limit".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_params_builder() {
        let params = BakerListParams::new()
            .sort_by("numDelegators")
            .order(SortOrder::Asc)
            .active_only(false)
            .limit(5);
        let query = params.to_query();

        assert!(!query.iter().any(|(k, _)| k == "active"));
        assert!(query.contains(&("sort.asc".to_string(), "numDelegators".to_string())));
        assert!(query.contains(&("limit".to_string(), "5".to_string())));
    }
}
