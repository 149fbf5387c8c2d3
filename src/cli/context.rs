//! Command execution context
//!
//! Builds the cache store and the service once per invocation from the
//! loaded configuration and the global flags.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::{CacheStore, SqliteStorage, StoreConfig, SystemClock};
use crate::cli::{Cli, OutputFormat};
use crate::client::{TzktClient, YieldClient};
use crate::config::Config;
use crate::error::Result;
use crate::service::BakingService;

/// The service as wired by the CLI
pub type CliService = BakingService<TzktClient, YieldClient>;

/// Context for command execution containing config, service, and runtime options.
pub struct CommandContext {
    pub config: Config,
    pub service: CliService,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config, apply flag overrides and wire the service.
    ///
    /// The durable tier is attached unless `--no-cache` is set or the
    /// config disables persistence. Failing to open it is logged and the
    /// command continues with a memory-only cache.
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = Config::load_at(cli.config.as_deref())?;
        if let Some(api_url) = &cli.api_url {
            config.api_url = api_url.clone();
        }
        config.validate()?;

        let indexer = TzktClient::with_base_url(config.api_url.clone())?;
        let yields = YieldClient::new(config.yield_url.clone())?;

        let mut store = CacheStore::new(
            StoreConfig {
                max_size: config.cache.max_size,
            },
            Arc::new(SystemClock),
        );

        if !cli.no_cache && config.cache.persist {
            if let Some(storage) = open_durable(&config) {
                store = store.with_durable(storage);
            }
        }

        let service = BakingService::new(Arc::new(indexer), Arc::new(yields), Arc::new(store));

        Ok(Self {
            config,
            service,
            format: cli.format,
        })
    }
}

/// Open the disk tier, or log why it is skipped. Neither an unresolvable
/// directory nor an unopenable database fails the command.
pub fn open_durable(config: &Config) -> Option<SqliteStorage> {
    let dir = match cache_dir(config) {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Disk cache unavailable: {}", e);
            return None;
        }
    };

    match SqliteStorage::open_at(&dir) {
        Ok(storage) => Some(storage),
        Err(e) => {
            log::warn!("Disk cache unavailable at {}: {}", dir.display(), e);
            None
        }
    }
}

/// Durable cache directory: `cache.dir` from the config, else the platform
/// cache directory.
pub fn cache_dir(config: &Config) -> Result<PathBuf> {
    match &config.cache.dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(SqliteStorage::cache_dir()?),
    }
}
