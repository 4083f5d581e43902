//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_STORAGE_KEY;

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the stored progress record.
    /// Defaults to `~/.beacon/data` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Key the progress record is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Activities shown by `beacon history` without `--all`
    #[serde(default = "default_history_preview")]
    pub history_preview: usize,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_history_preview() -> usize {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: default_storage_key(),
            history_preview: default_history_preview(),
        }
    }
}
