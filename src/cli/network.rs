//! Network-wide commands: network, cycle, preload

use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{Cycle, NetworkStats};
use crate::error::Result;
use crate::models::display::common::format_tez;
use crate::output::formatters::{format_percent, format_timestamp_local};
use crate::output::{self, Fields};

/// Show network statistics
pub async fn network(ctx: &CommandContext) -> Result<()> {
    let stats = ctx.service.network_stats().await?;
    output::print_fields(&network_fields(&stats), &stats, ctx.format)
}

/// Show the current cycle
pub async fn cycle(ctx: &CommandContext) -> Result<()> {
    let cycle = ctx.service.current_cycle().await?;
    // Progress needs the head level; a failure only hides that line
    let level = match ctx.service.network_stats().await {
        Ok(stats) => Some(stats.level),
        Err(e) => {
            log::debug!("No head level for cycle progress: {}", e);
            None
        }
    };
    output::print_fields(&cycle_fields(&cycle, level), &cycle, ctx.format)
}

/// Warm the cache for later commands
pub async fn preload(ctx: &CommandContext) -> Result<()> {
    let summary = ctx.service.preload_critical().await;

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "succeeded": summary.succeeded,
                "failed": summary.failed,
            });
            println!("{}", output::json::format_json(&json)?);
        }
        _ => {
            if summary.failed == 0 {
                println!("{} Preloaded {} datasets", "✓".green(), summary.succeeded);
            } else {
                println!(
                    "{} Preloaded {} datasets, {} failed (run with --debug for details)",
                    "!".yellow(),
                    summary.succeeded,
                    summary.failed
                );
            }
        }
    }
    Ok(())
}

fn network_fields(stats: &NetworkStats) -> Fields {
    let frozen_share = if stats.total_supply > 0 {
        stats.total_frozen as f64 / stats.total_supply as f64 * 100.0
    } else {
        0.0
    };

    let mut fields = Fields::new("Tezos Network").field("Level", stats.level);
    if let Some(cycle) = stats.cycle {
        fields = fields.field("Cycle", cycle);
    }
    fields
        .field("Block time", format_timestamp_local(&stats.timestamp))
        .field("Total supply", format_tez(stats.total_supply))
        .field("Circulating", format_tez(stats.circulating_supply))
        .field("Frozen", format_tez(stats.total_frozen))
        .field("Frozen share", format_percent(frozen_share))
        .field("Burned", format_tez(stats.total_burned))
}

fn cycle_fields(cycle: &Cycle, level: Option<i64>) -> Fields {
    let mut fields = Fields::new(format!("Cycle {}", cycle.index))
        .field("Levels", format!("{} - {}", cycle.first_level, cycle.last_level))
        .field("Started", format_timestamp_local(&cycle.start_time))
        .field("Ends", format_timestamp_local(&cycle.end_time))
        .field("Bakers", cycle.total_bakers);

    if let Some(level) = level {
        fields = fields.field("Progress", format_percent(cycle.progress_at(level) * 100.0));
    }
    fields
}
