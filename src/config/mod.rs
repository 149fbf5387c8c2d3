//! Configuration management for tezbake

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::DEFAULT_MAX_SIZE;
use crate::client::DEFAULT_API_URL;
use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Indexer base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Yield enrichment endpoint; without one, aggregate statistics use
    /// the default APYs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_url: Option<String>,

    #[serde(default)]
    pub cache: CacheSettings,
}

/// Cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Bound on in-memory entries
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Mirror persisting categories to disk
    #[serde(default = "default_persist")]
    pub persist: bool,

    /// Override the durable cache directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_max_size() -> usize {
    DEFAULT_MAX_SIZE
}

fn default_persist() -> bool {
    true
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            persist: default_persist(),
            dir: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            yield_url: None,
            cache: CacheSettings::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".tezbake").join("config.yaml"))
    }

    /// Load from an explicit path, or from the default path when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(Path::new(path)),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Reject values the cache and clients cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.cache.max_size == 0 {
            return Err(ConfigError::Invalid("cache.max_size must be at least 1".to_string()).into());
        }
        let urls = std::iter::once(("api_url", &self.api_url))
            .chain(self.yield_url.iter().map(|url| ("yield_url", url)));
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "{} must be an http(s) URL, got {:?}",
                    name, url
                ))
                .into());
            }
        }
        Ok(())
    }
}
