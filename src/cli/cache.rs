//! Cache management commands

use colored::Colorize;

use crate::cache::{SqliteStorage, StorageStats};
use crate::cli::context::cache_dir;
use crate::cli::{CommandContext, InvalidateCommands, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::CacheEntryDisplay;
use crate::output::formatters::{format_size, format_unix_local};
use crate::output::table;

/// State of the disk tier as seen by `cache status`
#[derive(Debug)]
pub enum DiskTier {
    Disabled,
    Unavailable(String),
    Ready(StorageStats),
}

impl DiskTier {
    /// Inspect the disk tier without ever failing the command
    pub fn inspect(config: &Config) -> Self {
        if !config.cache.persist {
            return Self::Disabled;
        }
        let stats = cache_dir(config).and_then(|dir| {
            SqliteStorage::open_at(&dir)
                .and_then(|storage| storage.stats())
                .map_err(Error::from)
        });
        match stats {
            Ok(stats) => Self::Ready(stats),
            Err(e) => {
                log::warn!("Disk cache unavailable: {}", e);
                Self::Unavailable(e.to_string())
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Unavailable(_) => "unavailable",
            Self::Ready(_) => "ok",
        }
    }

    fn stats(&self) -> Option<&StorageStats> {
        match self {
            Self::Ready(stats) => Some(stats),
            _ => None,
        }
    }
}

/// Show cache status/statistics
pub fn status(ctx: &CommandContext) -> Result<()> {
    let dir = cache_dir(&ctx.config)
        .map(|dir| dir.display().to_string())
        .ok();
    let disk = DiskTier::inspect(&ctx.config);
    let stats = disk.stats();
    let disk_error = match &disk {
        DiskTier::Unavailable(reason) => Some(reason.as_str()),
        _ => None,
    };
    let memory = ctx.service.cache_stats();

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "path": dir,
                "persist": ctx.config.cache.persist,
                "max_size": ctx.config.cache.max_size,
                "disk_status": disk.label(),
                "disk_error": disk_error,
                "disk_entries": stats.map(|d| d.entries),
                "disk_blob_entries": stats.map(|d| d.blob_entries),
                "disk_size_bytes": stats.map(|d| d.total_size_bytes),
                "newest_write_timestamp": stats.and_then(|d| d.newest_write),
                "memory_entries": memory.size,
                "hit_rate": memory.hit_rate,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("{}", "Cache Status".bold());
            println!("────────────────────────────────────────");
            println!(
                "Location:       {}",
                dir.as_deref().unwrap_or("(no cache directory)")
            );
            println!("Max entries:    {}", ctx.config.cache.max_size);

            match &disk {
                DiskTier::Ready(disk) => {
                    println!("Disk entries:   {}", disk.entries);
                    println!("  as blobs:     {}", disk.blob_entries);
                    println!("Total size:     {}", format_size(disk.total_size_bytes));
                    if let Some(newest) = disk.newest_write {
                        println!("Newest entry:   {}", format_unix_local(newest));
                    }
                }
                DiskTier::Unavailable(reason) => {
                    println!("Disk cache:     {} ({})", "unavailable".yellow(), reason)
                }
                DiskTier::Disabled => println!("Disk cache:     {}", "disabled".dimmed()),
            }

            if !memory.entries.is_empty() {
                let rows: Vec<CacheEntryDisplay> =
                    memory.entries.iter().map(CacheEntryDisplay::from).collect();
                println!("\n{}", table::format_table(&rows));
            }
        }
    }

    Ok(())
}

/// Clear every cached entry, in memory and on disk
pub fn clear(ctx: &CommandContext) -> Result<()> {
    let had_durable = ctx.service.store().has_durable();
    ctx.service.invalidate_all();

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "cleared": true,
                "disk": had_durable,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            if had_durable {
                println!("{} Cache cleared", "✓".green());
            } else {
                println!("Disk cache is disabled, nothing to clear");
            }
        }
    }

    Ok(())
}

/// Drop one invalidation scope
pub fn invalidate(ctx: &CommandContext, scope: &InvalidateCommands) -> Result<()> {
    let (label, removed) = match scope {
        InvalidateCommands::Network => ("network", ctx.service.invalidate_network_cache()?),
        InvalidateCommands::Baker { address } => {
            (address.as_str(), ctx.service.invalidate_baker_cache(address)?)
        }
    };

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "scope": label,
                "pattern_matches_removed": removed,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => println!("{} Invalidated {} cache entries", "✓".green(), label),
    }

    Ok(())
}

/// Show cache path
pub fn path(ctx: &CommandContext) -> Result<()> {
    println!("{}", cache_dir(&ctx.config)?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_with_dir(dir: std::path::PathBuf) -> Config {
        let mut config = Config::default();
        config.cache.dir = Some(dir);
        config
    }

    #[test]
    fn test_inspect_disabled_when_persist_off() {
        let mut config = Config::default();
        config.cache.persist = false;

        assert!(matches!(DiskTier::inspect(&config), DiskTier::Disabled));
    }

    #[test]
    fn test_inspect_reports_unopenable_dir_as_unavailable() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, b"occupied").unwrap();

        let disk = DiskTier::inspect(&config_with_dir(blocker));

        assert!(matches!(disk, DiskTier::Unavailable(_)));
        assert_eq!(disk.label(), "unavailable");
        assert!(disk.stats().is_none());
    }

    #[test]
    fn test_inspect_ready_on_fresh_dir() {
        let temp = TempDir::new().unwrap();
        let disk = DiskTier::inspect(&config_with_dir(temp.path().join("cache")));

        match disk {
            DiskTier::Ready(stats) => assert_eq!(stats.entries, 0),
            other => panic!("expected a ready disk tier, got {:?}", other),
        }
    }
}
