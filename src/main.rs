//! tezbake CLI - cached Tezos baking data

use clap::Parser;
use log::LevelFilter;

use tezbake::cli::{self, BakerCommands, CacheCommands, Cli, CommandContext, Commands};
use tezbake::error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` forces debug output for this crate; otherwise `RUST_LOG`
/// applies, defaulting to warnings only.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("tezbake", LevelFilter::Debug);
    }
    builder.format_timestamp_millis().init();
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = CommandContext::new(&cli)?;

    match &cli.command {
        Commands::Network => cli::network::network(&ctx).await,
        Commands::Cycle => cli::network::cycle(&ctx).await,
        Commands::Preload => cli::network::preload(&ctx).await,
        Commands::Baker(baker_cmd) => match baker_cmd {
            BakerCommands::List {
                sort_by,
                order,
                all,
                limit,
            } => cli::baker::list(&ctx, sort_by.clone(), *order, *all, *limit).await,
            BakerCommands::Get { address } => cli::baker::get(&ctx, address).await,
            BakerCommands::Rewards { address, limit } => {
                cli::baker::rewards(&ctx, address, *limit).await
            }
            BakerCommands::Stats => cli::baker::stats(&ctx).await,
        },
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => cli::cache::status(&ctx),
            CacheCommands::Clear => cli::cache::clear(&ctx),
            CacheCommands::Path => cli::cache::path(&ctx),
            CacheCommands::Invalidate(scope) => cli::cache::invalidate(&ctx, scope),
        },
    }
}
