//! Tezos indexer data models
//!
//! Domain types returned by the indexer and the yield collaborator.
//! Amounts are in mutez (1 tez = 1_000_000 mutez).

mod baker;
mod network;
mod yields;

// Re-export all models for convenient access
pub use baker::{Baker, BakerListParams, BakerReward, SortOrder};
pub use network::{Cycle, NetworkStats};
pub use yields::YieldRates;

/// Mutez per tez
pub const MUTEZ_PER_TEZ: f64 = 1_000_000.0;
