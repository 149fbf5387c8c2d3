//! Baker command implementations

use crate::cli::{CommandContext, SortDir};
use crate::client::{Baker, BakerListParams};
use crate::error::Result;
use crate::models::display::common::format_tez;
use crate::models::{BakerDisplay, RewardDisplay};
use crate::output::formatters::{format_percent, format_timestamp_local};
use crate::output::{self, Fields};
use crate::service::{BakersStats, YieldSource};

/// Run the baker list command
pub async fn list(
    ctx: &CommandContext,
    sort_by: String,
    order: SortDir,
    all: bool,
    limit: u32,
) -> Result<()> {
    let params = BakerListParams::new()
        .sort_by(sort_by)
        .order(order.into())
        .active_only(!all)
        .limit(limit);

    let bakers = ctx.service.bakers(&params).await?;
    let rows: Vec<BakerDisplay> = bakers.iter().map(BakerDisplay::from).collect();
    output::print_rows(&rows, &bakers, ctx.format)
}

/// Run the baker get command
pub async fn get(ctx: &CommandContext, address: &str) -> Result<()> {
    let baker = ctx.service.baker_details(address).await?;
    output::print_fields(&baker_fields(&baker), &baker, ctx.format)
}

/// Run the baker rewards command
pub async fn rewards(ctx: &CommandContext, address: &str, limit: u32) -> Result<()> {
    let rewards = ctx.service.baker_rewards(address, limit).await?;
    let rows: Vec<RewardDisplay> = rewards.iter().map(RewardDisplay::from).collect();
    output::print_rows(&rows, &rewards, ctx.format)
}

/// Run the baker stats command
pub async fn stats(ctx: &CommandContext) -> Result<()> {
    let stats = ctx.service.bakers_stats().await?;
    output::print_fields(&stats_fields(&stats), &stats, ctx.format)
}

fn baker_fields(baker: &Baker) -> Fields {
    let mut fields = Fields::new(baker.display_name().to_string())
        .field("Address", &baker.address)
        .field("Active", if baker.active { "yes" } else { "no" })
        .field("Balance", format_tez(baker.balance))
        .field("Staking balance", format_tez(baker.staking_balance))
        .field("Delegated", format_tez(baker.delegated_balance))
        .field("Delegators", baker.num_delegators)
        .field("Stakers", baker.stakers_count);

    if let Some(last) = &baker.last_activity_time {
        fields = fields.field("Last active", format_timestamp_local(last));
    }
    fields
}

fn stats_fields(stats: &BakersStats) -> Fields {
    let source = match stats.yield_source {
        YieldSource::Live => "live",
        YieldSource::Fallback => "default (yield source unavailable)",
    };

    Fields::new("Baking Statistics")
        .field("Level", stats.level)
        .field("Bakers", stats.total_bakers)
        .field("Total staked", format_tez(stats.total_staking_balance))
        .field("Average stake", format_tez(stats.average_staking_balance))
        .field("Delegators", stats.total_delegators)
        .field("Staking ratio", format_percent(stats.staking_ratio))
        .field("Delegation APY", format_percent(stats.delegation_apy))
        .field("Staking APY", format_percent(stats.staking_apy))
        .field("Yield source", source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{BakerBuilder, NetworkStatsBuilder};

    #[test]
    fn test_baker_fields_use_alias_as_title() {
        colored::control::set_override(false);
        let baker = BakerBuilder::new("tz1abc").alias("Example").build();
        let out = baker_fields(&baker).render_pretty();

        assert!(out.starts_with("Example"));
        assert!(out.contains("tz1abc"));
        assert!(out.contains("Last active:"));
    }

    #[test]
    fn test_stats_fields_flag_fallback() {
        colored::control::set_override(false);
        let stats = BakersStats::compute(&NetworkStatsBuilder::new().build(), &[], None);
        let out = stats_fields(&stats).render_pretty();

        assert!(out.contains("3.50%"));
        assert!(out.contains("10.50%"));
        assert!(out.contains("default (yield source unavailable)"));
    }
}
