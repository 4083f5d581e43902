//! Key-value persistence adapters
//!
//! The progress record lives as one JSON blob under one string key.
//! Callers pick an adapter; the engine never sees it.

mod atomic;
mod file;
mod memory;

pub(crate) use atomic::{lock_for, write_atomic};

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

/// Storage key used for the progress record
pub const DEFAULT_STORAGE_KEY: &str = "gooddeeds_user_data";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Stored value for {key:?} is not valid UTF-8")]
    NotUtf8 { key: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// String key to string value storage
pub trait KeyValueStore {
    /// Read a value; Ok(None) when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
