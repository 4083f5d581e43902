//! Configuration loading and management

mod io;
mod settings;

pub use settings::Settings;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure (`~/.beacon/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Directory the progress store lives in
    pub fn data_dir(&self) -> PathBuf {
        self.settings
            .data_dir
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("data"))
    }
}
