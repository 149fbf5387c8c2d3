//! Network-wide models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current network statistics (`/statistics/current`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    /// Block level the statistics were taken at
    pub level: i64,

    /// Block timestamp
    pub timestamp: DateTime<Utc>,

    /// Cycle of that block (absent on very old indexer versions)
    #[serde(default)]
    pub cycle: Option<i32>,

    pub total_supply: i64,

    pub circulating_supply: i64,

    #[serde(default)]
    pub total_frozen: i64,

    #[serde(default)]
    pub total_burned: i64,

    #[serde(default)]
    pub total_created: i64,
}

/// A baking cycle (`/cycles`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub index: i32,

    pub first_level: i64,

    pub start_time: DateTime<Utc>,

    pub last_level: i64,

    pub end_time: DateTime<Utc>,

    #[serde(default)]
    pub total_bakers: u32,

    #[serde(default)]
    pub total_baking_power: i64,
}

impl Cycle {
    /// Fraction of the cycle elapsed at `level`, clamped to `0.0..=1.0`
    pub fn progress_at(&self, level: i64) -> f64 {
        let span = (self.last_level - self.first_level + 1) as f64;
        if span <= 0.0 {
            return 0.0;
        }
        ((level - self.first_level + 1) as f64 / span).clamp(0.0, 1.0)
    }
}
