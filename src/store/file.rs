//! File-backed store: one `<key>.json` file per key
//!
//! Writes go to a temp file that is renamed over the target while an
//! exclusive lock is held, so a crash never leaves a half-written record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, StoreError, lock_for, write_atomic};

/// Directory of JSON files keyed by storage key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| StoreError::NotUtf8 {
                    key: key.to_string(),
                }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        self.ensure_dir()?;
        write_atomic(&path, value.as_bytes())?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if !self.dir.exists() {
            return Ok(());
        }
        let _lock = lock_for(&path)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_creates_dir() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("data"));

        assert_eq!(store.get("progress").unwrap(), None);
        store.set("progress", r#"{"a":1}"#).unwrap();
        assert_eq!(store.get("progress").unwrap().as_deref(), Some(r#"{"a":1}"#));
        assert!(store.dir().join("progress.json").exists());
        assert!(!store.dir().join("progress.json.tmp").exists());
    }

    #[test]
    fn test_overwrite_and_remove() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }

    #[test]
    fn test_remove_without_dir() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("missing"));
        store.remove("k").unwrap();
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let store = FileStore::new("/tmp/beacon-test");
        assert!(matches!(
            store.path_for("../escape"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(store.path_for("").is_err());
        assert!(store.path_for("a/b").is_err());
        assert!(store.path_for("gooddeeds_user_data").is_ok());
    }

    #[test]
    fn test_non_utf8_is_an_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(dir.path().join("k.json"), [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(store.get("k"), Err(StoreError::NotUtf8 { .. })));
    }
}
