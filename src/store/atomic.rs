//! Crash-safe file replacement shared by the store and the config file

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::StoreError;

/// `<path>.<suffix>` next to `path`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Exclusive lock on `<path>.lock`, released when the handle drops.
///
/// The lock lives in its own file so renaming over `path` cannot disturb it.
pub(crate) fn lock_for(path: &Path) -> Result<File, StoreError> {
    let lock_path = sibling(path, "lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .map_err(|e| StoreError::io(&lock_path, e))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| StoreError::io(&lock_path, e))?;
    Ok(lock_file)
}

/// Replace `path` with `contents`: write `<path>.tmp`, sync, rename over.
/// The parent directory must exist.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let _lock = lock_for(path)?;

    let temp_path = sibling(path, "tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| StoreError::io(&temp_path, e))?;
    temp_file
        .write_all(contents)
        .and_then(|_| temp_file.sync_all())
        .map_err(|e| StoreError::io(&temp_path, e))?;

    std::fs::rename(&temp_path, path).map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sibling_appends_suffix() {
        assert_eq!(
            sibling(Path::new("/data/progress.json"), "lock"),
            PathBuf::from("/data/progress.json.lock")
        );
    }

    #[test]
    fn test_write_replaces_and_cleans_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!dir.path().join("config.toml.tmp").exists());
    }

    #[test]
    fn test_missing_parent_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("k.json");
        assert!(matches!(
            write_atomic(&path, b"x"),
            Err(StoreError::Io { .. })
        ));
    }
}
