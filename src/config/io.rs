//! Configuration file I/O operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Config;
use crate::store::write_atomic;

/// Commented header written above a freshly created config
const CONFIG_HEADER: &str = "\
# Beacon configuration
#
# [settings]
#   data_dir        - Where progress is stored (default: ~/.beacon/data)
#   storage_key     - Name of the stored progress record
#   history_preview - Activities shown by `beacon history` without --all

";

impl Config {
    /// Get the global config directory path (~/.beacon/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".beacon")
    }

    /// Get the global config file path (~/.beacon/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a file with atomic write and file locking.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let body = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        let content = format!("{}{}", CONFIG_HEADER, body);

        write_atomic(path, content.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Load the global configuration, creating it with defaults if missing
    pub fn load() -> Result<Self> {
        Self::load_or_init(&Self::global_config_path())
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to_file(path)?;
            tracing::info!("Created {}", path.display());
            return Ok(config);
        }
        Self::from_file(path)
    }
}
