//! Key-value storage for preferences and history.
//!
//! The engine itself never touches the filesystem; a [`KeyValueStore`] is
//! handed to the [`crate::session::Calculator`] instead. [`MemoryStore`]
//! keeps everything in process, [`FileStore`] writes the same values to a
//! TOML file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A stored value: the store only knows booleans and strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    Text(String),
}

/// Persistent key-value storage.
pub trait KeyValueStore {
    fn get_bool(&self, key: &str) -> Option<bool>;

    fn get_string(&self, key: &str) -> Option<String>;

    fn put_bool(&mut self, key: &str, value: bool);

    fn put_string(&mut self, key: &str, value: String);

    /// Make pending writes durable.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-process store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, StoredValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(StoredValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(StoredValue::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), StoredValue::Bool(value));
    }

    fn put_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), StoredValue::Text(value));
    }
}

/// Store backed by a TOML file, written on [`KeyValueStore::commit`].
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    values: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`. A missing file opens as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let values: BTreeMap<String, StoredValue> = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            MemoryStore { values }
        } else {
            MemoryStore::new()
        };

        Ok(Self { path, values })
    }

    /// Open the store at [`default_path`].
    pub fn open_default() -> Result<Self> {
        let path = default_path().context("No configuration directory available")?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get_bool(key)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get_string(key)
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.values.put_bool(key, value);
    }

    fn put_string(&mut self, key: &str, value: String) {
        self.values.put_string(key, value);
    }

    fn commit(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let contents = toml::to_string(&self.values.values).context("Failed to serialize store")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

/// Default location of the store: `<config dir>/expertrow/preferences.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("expertrow").join("preferences.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("expertrow-store-{}-{}", std::process::id(), name))
            .join("preferences.toml")
    }

    #[test]
    fn test_memory_store_types() {
        let mut store = MemoryStore::new();
        store.put_bool("flag", false);
        store.put_string("text", "hello".to_string());

        assert_eq!(store.get_bool("flag"), Some(false));
        assert_eq!(store.get_string("text").as_deref(), Some("hello"));
        // Reading with the wrong type finds nothing.
        assert_eq!(store.get_string("flag"), None);
        assert_eq!(store.get_bool("missing"), None);
        assert_eq!(store.values.len(), 2);
    }

    #[test]
    fn test_file_store_missing_file() {
        let store = FileStore::open(temp_path("missing")).unwrap();
        assert_eq!(store.get_bool("anything"), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round-trip");
        let mut store = FileStore::open(&path).unwrap();
        store.put_bool("show_keypad_setting", false);
        store.put_string("history_key", "2+2 = 4###1+1 = 2".to_string());
        store.commit().unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_bool("show_keypad_setting"), Some(false));
        assert_eq!(
            reopened.get_string("history_key").as_deref(),
            Some("2+2 = 4###1+1 = 2")
        );

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let path = temp_path("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "this is = = not toml").unwrap();

        assert!(FileStore::open(&path).is_err());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
