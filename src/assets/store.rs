//! String-to-string preference storage for asset choices.

use crate::error::Result;
use crate::utils::persistence::{load_json_or_default, save_json};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const PREFS_FILE: &str = "prefs.json";

/// Key-value store in the shape of browser local storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store for tests and for running without a writable home.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a pretty-printed JSON object, written through on every
/// change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `prefs.json` in `dir`. A missing or corrupt file starts empty.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(PREFS_FILE);
        let entries = load_json_or_default(&path);
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        save_json(&self.path, &self.entries)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_basics() {
        let mut store = MemoryStore::new();
        assert!(store.get("fb_bg").is_none());
        store.set("fb_bg", "data:,x").unwrap();
        assert_eq!(store.get("fb_bg").as_deref(), Some("data:,x"));
        assert_eq!(store.len(), 1);
        store.remove("fb_bg").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = std::env::temp_dir().join(format!("flapper-store-unit-{}", std::process::id()));
        let mut store = JsonFileStore::open(&dir);
        assert!(store.remove("fb_bird").is_ok());
        assert!(!store.path().exists());
    }
}
