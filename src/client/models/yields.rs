//! Yield percentages from the enrichment collaborator

use serde::{Deserialize, Serialize};

/// Annualized yields in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldRates {
    pub delegation_apy: f64,
    pub staking_apy: f64,
}

impl YieldRates {
    /// Both rates are finite and within 0..=100 percent
    pub fn is_plausible(&self) -> bool {
        [self.delegation_apy, self.staking_apy]
            .iter()
            .all(|rate| rate.is_finite() && (0.0..=100.0).contains(rate))
    }
}
