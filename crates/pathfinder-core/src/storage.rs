//! Key/value storage standing in for browser local storage
//!
//! Values are opaque strings (JSON in practice). `FileStorage` keeps one
//! file per key so that separate processes sharing a data directory see
//! each other's writes; `MemoryStorage` is process-local.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use crate::error::{PathfinderError, Result};

pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at the platform data directory (`~/.local/share/pathfinder` on Linux)
    pub fn default_location() -> Result<Self> {
        let dir = dirs::data_dir().ok_or(PathfinderError::NoDataDir)?;
        Ok(Self::new(dir.join("pathfinder")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PathfinderError::storage(key, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| PathfinderError::storage(key, e))?;

        // Each writer gets its own temp file in the same directory, then
        // renames it over the value so readers only ever see a whole value
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| PathfinderError::storage(key, e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| PathfinderError::storage(key, e))?;
        tmp.persist(self.path_for(key))
            .map_err(|e| PathfinderError::storage(key, e.error))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PathfinderError::storage(key, e)),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("absent").unwrap(), None);
    }

    #[test]
    fn test_file_storage_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set_item("k", "{\"a\":1}").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.path().join("nested").join("k.json").exists());

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_file_storage_remove_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.remove_item("never-set").is_ok());
    }

    #[test]
    fn test_file_storage_shared_between_handles() {
        let dir = TempDir::new().unwrap();
        let a = FileStorage::new(dir.path());
        let b = FileStorage::new(dir.path());

        a.set_item("shared", "one").unwrap();
        assert_eq!(b.get_item("shared").unwrap().as_deref(), Some("one"));
    }

    #[test]
    fn test_file_storage_unreadable_path_is_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the value file should be makes reads fail
        fs::create_dir_all(dir.path().join("blocked.json")).unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.get_item("blocked").is_err());
    }

    #[test]
    fn test_file_storage_concurrent_writers_all_succeed() {
        let dir = TempDir::new().unwrap();
        let writers: Vec<_> = (0..4)
            .map(|w| {
                let storage = FileStorage::new(dir.path());
                std::thread::spawn(move || {
                    (0..50)
                        .filter(|i| {
                            let value = format!("{{\"writer\":{},\"n\":{}}}", w, i);
                            storage.set_item("pathfinder.profile", &value).is_err()
                        })
                        .count()
                })
            })
            .collect();

        let failures: usize = writers.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(failures, 0);

        let stored = FileStorage::new(dir.path())
            .get_item("pathfinder.profile")
            .unwrap()
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert!(parsed["writer"].is_u64());

        // Only the value file is left behind
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_memory_storage_overwrite() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "1").unwrap();
        storage.set_item("k", "2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("2"));
    }
}
