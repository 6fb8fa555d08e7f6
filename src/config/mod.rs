// Configuration management for tunestash
// Handles loading/saving settings, with sensible defaults when config is missing

use dirs::{config_dir, data_dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog_dir: PathBuf,
    pub catalog_index: String,
    pub accounts_path: PathBuf,
    pub log_dir: PathBuf,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How many "did you mean" hints to show when a catalog lookup misses. 0 turns them off.
    pub suggestions: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { suggestions: 3 }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tunestash");

        Self {
            catalog_dir: data_dir.join("catalog"),
            catalog_index: "albums.txt".to_string(),
            accounts_path: data_dir.join("users.json"),
            log_dir: data_dir.join("logs"),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing the defaults there on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, content).map_err(|e| Error::io(path, e))?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| Error::Config("Could not find config directory".to_string()))?
            .join("tunestash");

        Ok(config_dir.join("config.toml"))
    }
}
