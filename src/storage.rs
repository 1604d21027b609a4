//! Key-value flag storage.
//!
//! [`FileStore`] plays the role of the browser's durable local storage and
//! survives restarts; [`MemoryStore`] is the per-tab session storage and lives
//! as long as the process.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Durable key holding the selected theme id.
pub const THEME_KEY: &str = "theme";
/// Session key set once the boot screen has been shown.
pub const HAS_VISITED_KEY: &str = "hasVisited";
/// Session key asking the next page load to replay the boot screen.
pub const PENDING_REBOOT_KEY: &str = "pendingReboot";

pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    /// Removes `key`, returning the value it held.
    fn remove(&mut self, key: &str) -> Option<String>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

/// JSON object on disk, rewritten atomically on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or malformed file yields an
    /// empty store; the file is only created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Ignoring unreadable storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn persist(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;

        // Atomic write: write to temp file first, then rename
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn persist_or_warn(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!("Failed to write {}: {}", self.path.display(), e);
        }
    }
}

impl Storage for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist_or_warn();
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        let old = self.entries.remove(key);
        if old.is_some() {
            self.persist_or_warn();
        }
        old
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_remove_returns_old_value() {
        let mut store = MemoryStore::new();
        store.set(PENDING_REBOOT_KEY, "true");
        assert_eq!(store.remove(PENDING_REBOOT_KEY).as_deref(), Some("true"));
        assert_eq!(store.remove(PENDING_REBOOT_KEY), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path);
        assert_eq!(store.get(THEME_KEY), None);
        store.set(THEME_KEY, "ocean");
        assert!(path.exists());

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("ocean"));
    }

    #[test]
    fn test_file_store_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut a = FileStore::open(&path);
        let mut b = FileStore::open(&path);
        a.set(THEME_KEY, "ocean");
        b.set(THEME_KEY, "basic");

        assert_eq!(FileStore::open(&path).get(THEME_KEY).as_deref(), Some("basic"));
    }

    #[test]
    fn test_file_store_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get(THEME_KEY), None);

        // First write replaces the broken file
        store.set(THEME_KEY, "red-sands");
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"red-sands\""));
    }
}
