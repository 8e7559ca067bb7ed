//! File-backed [`Storage`] backend.
//!
//! One file per key under a data directory, named `<key>.json`. Writes
//! replace the whole file, matching the adapter's overwrite-wholesale
//! contract.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Error, Result};

use super::Storage;

/// Stores each key as a JSON file in a single directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are storage names like `warung_products`, never paths
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(Error::Config {
                message: format!("Invalid storage key: {key:?}"),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// The directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::write(&path, value)?;
        debug!(key, bytes = value.len(), "persisted collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_absent_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(storage.get("warung_products").unwrap().is_none());
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        storage.put("warung_products", r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            storage.get("warung_products").unwrap().unwrap(),
            r#"[{"id":1}]"#
        );
        assert!(dir.path().join("warung_products.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(matches!(
            storage.get("../escape").unwrap_err(),
            Error::Config { message: _ }
        ));
    }

    #[test]
    fn test_reopen_sees_previous_writes() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = FileStorage::open(dir.path()).unwrap();
            storage.put("pemancingan_packages", "[]").unwrap();
        }
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get("pemancingan_packages").unwrap().unwrap(), "[]");
    }
}
