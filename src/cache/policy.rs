//! Named cache policies, one per data category

use std::time::Duration;

/// How entries of one data category are cached.
///
/// Policies are plain configuration values: they parametrize store calls
/// and never hold entries themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub ttl: Duration,
    /// Mirror entries to the durable tier
    pub persist: bool,
    /// Serve expired data while a background refresh runs
    pub stale_while_revalidate: bool,
}

impl CachePolicy {
    // Network-wide state moves slowly
    pub const NETWORK_STATS: CachePolicy =
        CachePolicy::new(Duration::from_secs(10 * 60), true, true); // 10 min
    pub const CURRENT_CYCLE: CachePolicy =
        CachePolicy::new(Duration::from_secs(5 * 60), true, true); // 5 min
    pub const BAKERS_LIST: CachePolicy =
        CachePolicy::new(Duration::from_secs(5 * 60), true, true); // 5 min

    // Per-baker detail changes every block
    pub const BAKER_DETAILS: CachePolicy =
        CachePolicy::new(Duration::from_secs(2 * 60), false, true); // 2 min

    // Settled reward history; refreshing stale history buys nothing
    pub const BAKER_REWARDS: CachePolicy =
        CachePolicy::new(Duration::from_secs(60 * 60), true, false); // 1 hr

    // Cheap to recompute from the other categories
    pub const BAKERS_STATS: CachePolicy =
        CachePolicy::new(Duration::from_secs(60), false, true); // 1 min

    pub const fn new(ttl: Duration, persist: bool, stale_while_revalidate: bool) -> Self {
        Self {
            ttl,
            persist,
            stale_while_revalidate,
        }
    }

    pub fn ttl_millis(&self) -> i64 {
        self.ttl.as_millis() as i64
    }
}

/// Data categories served by the façade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataCategory {
    NetworkStats,
    CurrentCycle,
    BakersList,
    BakerDetails,
    BakerRewards,
    BakersStats,
}

impl DataCategory {
    pub const ALL: [DataCategory; 6] = [
        DataCategory::NetworkStats,
        DataCategory::CurrentCycle,
        DataCategory::BakersList,
        DataCategory::BakerDetails,
        DataCategory::BakerRewards,
        DataCategory::BakersStats,
    ];

    pub fn policy(&self) -> CachePolicy {
        match self {
            DataCategory::NetworkStats => CachePolicy::NETWORK_STATS,
            DataCategory::CurrentCycle => CachePolicy::CURRENT_CYCLE,
            DataCategory::BakersList => CachePolicy::BAKERS_LIST,
            DataCategory::BakerDetails => CachePolicy::BAKER_DETAILS,
            DataCategory::BakerRewards => CachePolicy::BAKER_REWARDS,
            DataCategory::BakersStats => CachePolicy::BAKERS_STATS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataCategory::NetworkStats => "network_stats",
            DataCategory::CurrentCycle => "current_cycle",
            DataCategory::BakersList => "bakers_list",
            DataCategory::BakerDetails => "baker_details",
            DataCategory::BakerRewards => "baker_rewards",
            DataCategory::BakersStats => "bakers_stats",
        }
    }
}
