//! In-memory [`Storage`] backend.

use std::collections::HashMap;

use crate::errors::Result;

use super::Storage;

/// A `HashMap`-backed store. Nothing survives the process; used by tests and
/// by sessions that deliberately start from the seed catalog.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, for tests that simulate an existing data set.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_get_absent_key_is_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get("warung_products").unwrap().is_none());
    }

    #[test]
    fn test_put_overwrites_wholesale() {
        let mut storage = MemoryStorage::new();
        storage.put("warung_products", "[1]").unwrap();
        storage.put("warung_products", "[1,2]").unwrap();
        assert_eq!(storage.get("warung_products").unwrap().unwrap(), "[1,2]");
    }
}
