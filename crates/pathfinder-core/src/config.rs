use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::FileStorage;
use crate::watcher::MIN_WATCH_INTERVAL;

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1500;
pub const DEFAULT_ASSISTANT_DELAY_MS: u64 = 1000;
pub const DEFAULT_WATCH_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_LOG_LEVEL: &str = "pathfinder=info";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub reply_delay_ms: u64,
    pub assistant_delay_ms: u64,
    pub watch_interval_ms: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            data_dir: None,
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            assistant_delay_ms: DEFAULT_ASSISTANT_DELAY_MS,
            watch_interval_ms: DEFAULT_WATCH_INTERVAL_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Load from the default location, falling back to defaults when no
    /// file has been written yet
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn assistant_delay(&self) -> Duration {
        Duration::from_millis(self.assistant_delay_ms)
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms).max(MIN_WATCH_INTERVAL)
    }

    /// Storage rooted at the configured data directory, or the platform
    /// default when none is set
    pub fn storage(&self) -> Result<FileStorage> {
        match &self.data_dir {
            Some(dir) => Ok(FileStorage::new(dir.clone())),
            None => Ok(FileStorage::default_location()?),
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("pathfinder").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.reply_delay(), Duration::from_millis(1500));
        assert_eq!(config.assistant_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_save_creates_directory_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            data_dir: Some(dir.path().join("data")),
            reply_delay_ms: 10,
            ..Config::new()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"watch_interval_ms": 250}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.watch_interval_ms, 250);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_storage_uses_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::new()
        };
        assert_eq!(config.storage().unwrap().dir(), dir.path());
    }
}
