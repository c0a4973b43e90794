use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::theme::ambient::AmbientSource;
use crate::utils::paths::{get_config_path, get_store_path};

/// Where the item list and theme are persisted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Overrides `~/.todo-widget/store.db`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => get_store_path(),
        }
    }
}

/// How the system light/dark preference is detected
#[derive(Debug, Clone, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default)]
    pub system: AmbientSource,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    5
}

impl AppearanceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            system: AmbientSource::default(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub appearance: AppearanceConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
