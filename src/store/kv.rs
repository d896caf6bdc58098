//! JSON key-value store.
//!
//! A [`Store`] wraps a [`KeyValueBackend`] and adds JSON decoding with
//! default fallback, failure-tolerant writes, and change subscriptions.
//! Reads never fail: a missing, unreadable or wrong-shaped value yields the
//! caller's default. Writes never fail either: errors are logged and the
//! write is dropped.

use super::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
#[cfg(test)]
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::{debug, error, warn};

/// Raw storage of JSON values by key.
pub trait KeyValueBackend {
    /// Returns the value stored under `key`, if any.
    fn load(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: Value) -> StoreResult<()>;
}

/// In-process backend for tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, Value>,
}

#[cfg(test)]
impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueBackend for MemoryBackend {
    fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: Value) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Backend persisting every key in a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the whole file. A missing file is an empty store.
    fn read_entries(&self) -> StoreResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(other) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
            Err(e) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Moves an unreadable store file aside so new writes can proceed.
    fn quarantine(&self) -> StoreResult<PathBuf> {
        let mut backup = self.path.clone().into_os_string();
        backup.push(".corrupt");
        let backup = PathBuf::from(backup);
        std::fs::rename(&self.path, &backup)?;
        Ok(backup)
    }

    /// Writes the file atomically: temp file in the same directory, then rename.
    fn write_entries(&self, entries: &Map<String, Value>) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let content = serde_json::to_string_pretty(entries)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Wrote store file {}", self.path.display());
        Ok(())
    }
}

impl KeyValueBackend for FileBackend {
    fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: Value) -> StoreResult<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StoreError::Corrupt { reason, .. }) => {
                let backup = self.quarantine()?;
                warn!(
                    "Store file was unreadable ({}); moved it to {}",
                    reason,
                    backup.display()
                );
                Map::new()
            }
            Err(e) => return Err(e),
        };

        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

type Callback = Box<dyn Fn(&Value)>;

struct Subscriber {
    key: String,
    callback: Callback,
}

/// Typed, failure-tolerant access to a key-value backend.
pub struct Store<B: KeyValueBackend> {
    backend: B,
    subscribers: Vec<Subscriber>,
}

impl<B: KeyValueBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            subscribers: Vec::new(),
        }
    }

    /// Reads and decodes `key`, propagating every failure.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.backend.load(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Reads and decodes `key`, falling back to `default` on absence or any error.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!("Failed to read '{}' from store, using default: {}", key, e);
                default
            }
        }
    }

    /// Encodes and writes `value` under `key`, then notifies subscribers.
    pub fn try_set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StoreResult<()> {
        let value = serde_json::to_value(value)?;
        self.backend.save(key, value.clone())?;

        for subscriber in self.subscribers.iter().filter(|s| s.key == key) {
            (subscriber.callback)(&value);
        }
        Ok(())
    }

    /// Like [`Store::try_set`], but logs failures instead of returning them.
    ///
    /// Returns `true` when the value was written.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to write '{}' to store: {}", key, e);
                false
            }
        }
    }

    /// Registers `callback` to run after every successful write of `key`.
    pub fn subscribe<F>(&mut self, key: &str, callback: F)
    where
        F: Fn(&Value) + 'static,
    {
        self.subscribers.push(Subscriber {
            key: key.to_string(),
            callback: Box::new(callback),
        });
    }
}
