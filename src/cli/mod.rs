//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod baker;
pub mod cache;
pub mod context;
pub mod network;

pub use args::{OutputFormat, SortDir};
pub use context::CommandContext;

/// tezbake - cached Tezos baking data from the command line
#[derive(Parser, Debug)]
#[command(name = "tezbake")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "TEZBAKE_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "TEZBAKE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the indexer base URL
    #[arg(long, global = true, env = "TEZBAKE_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TEZBAKE_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Skip the disk cache, fetch fresh data from the indexer
    #[arg(long, global = true, env = "TEZBAKE_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show current network statistics
    Network,

    /// Show the cycle in progress
    Cycle,

    /// Browse bakers
    #[command(subcommand)]
    Baker(BakerCommands),

    /// Warm the cache with network stats, the current cycle and the baker list
    Preload,

    /// Manage the local cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

/// Baker subcommands
#[derive(Subcommand, Debug)]
pub enum BakerCommands {
    /// List bakers
    List {
        /// Indexer field to sort by
        #[arg(long, default_value = "stakingBalance")]
        sort_by: String,

        /// Sort direction
        #[arg(long, value_enum, default_value = "desc")]
        order: SortDir,

        /// Include inactive bakers
        #[arg(long)]
        all: bool,

        /// Maximum number of bakers
        #[arg(long, short = 'n', default_value_t = 100)]
        limit: u32,
    },

    /// Show one baker
    Get {
        /// Baker address (tz1..., tz2..., tz3..., tz4...)
        address: String,
    },

    /// Show a baker's recent reward cycles
    Rewards {
        /// Baker address
        address: String,

        /// Number of cycles
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: u32,
    },

    /// Network-wide baking statistics
    Stats,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear all cached data
    Clear,
    /// Print cache directory path
    Path,
    /// Drop part of the cache
    #[command(subcommand)]
    Invalidate(InvalidateCommands),
}

/// Cache invalidation scopes
#[derive(Subcommand, Debug)]
pub enum InvalidateCommands {
    /// Network stats, current cycle, aggregate stats and every baker list
    Network,
    /// One baker's details and reward history
    Baker {
        /// Baker address
        address: String,
    },
}
