//! Key/value persistence for preferences and recents.
//!
//! ## Learning: Traits as Seams
//!
//! The viewer never touches the disk directly. It talks to a `Store`, and
//! the binary decides which implementation to hand it: [`FileStore`] for
//! real use, [`MemoryStore`] for tests or for a session that must not
//! leave anything behind.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A persistence backend holding JSON values by key.
pub trait Store {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Reads `key` and deserializes it.
pub fn load<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: Store + ?Sized,
{
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serializes `value` and writes it under `key`.
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: Store + ?Sized,
{
    store.set(key, serde_json::to_value(value)?)
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// An in-memory store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// A store backed by a single JSON object file.
///
/// The file is re-read on every access so that two running viewers see
/// each other's writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Uses the given file, which need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `state.json` in the platform config directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Returns the default state file path.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let config_dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(config_dir.join("peek").join("state.json"))
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let data = std::fs::read(&self.path)?;
        match serde_json::from_slice(&data)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::NotAnObject(self.path.display().to_string())),
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write to a temporary file first, then rename (atomic write)
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, serde_json::to_vec_pretty(map)?)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut map = self.read_all().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable state file: {}", e);
            Map::new()
        });
        map.insert(key.to_string(), value);
        self.write_all(&map)
    }
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("State file is not a JSON object: {0}")]
    NotAnObject(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());
        store.set("k", json!({"a": 1})).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!({"a": 1})));
    }

    #[test]
    fn test_typed_helpers() {
        let mut store = MemoryStore::new();
        save(&mut store, "list", &vec![1, 2, 3]).unwrap();
        let list: Option<Vec<i32>> = load(&store, "list").unwrap();
        assert_eq!(list, Some(vec![1, 2, 3]));

        store.set("bad", json!("text")).unwrap();
        assert!(load::<Vec<i32>, _>(&store, "bad").is_err());
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("peek").join("state.json");

        let mut store = FileStore::new(&path);
        assert!(store.get("settings").unwrap().is_none());
        store.set("settings", json!({"dark": true})).unwrap();
        store.set("recents", json!([])).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("settings").unwrap(), Some(json!({"dark": true})));
        assert_eq!(reopened.get("recents").unwrap(), Some(json!([])));
    }

    #[test]
    fn test_file_store_recovers_from_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(store.get("settings"), Err(StoreError::Json(_))));
        store.set("settings", json!({})).unwrap();
        assert_eq!(store.get("settings").unwrap(), Some(json!({})));
    }

    #[test]
    fn test_file_store_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("x"), Err(StoreError::NotAnObject(_))));
    }
}
