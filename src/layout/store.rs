//! Persistence of the widget configuration through a key-value slot.
//!
//! [`ConfigStore`] reads and writes the JSON-serialized [`Configuration`]
//! under the [`CONFIG_SLOT`] key of a [`KeyValueStore`]. A store without a
//! backend models a runtime with no persistence: loads see nothing and
//! saves are dropped.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::record::Configuration;
use crate::config::xdg;

/// Key of the slot holding the serialized configuration.
pub const CONFIG_SLOT: &str = "widgetConfig";

/// Errors raised while loading or saving the configuration slot.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not read the slot.
    #[error("Failed to read slot '{key}'")]
    Read {
        /// Slot key.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The backend could not write or remove the slot.
    #[error("Failed to write slot '{key}'")]
    Write {
        /// Slot key.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The slot holds content that is not a valid configuration.
    #[error("Stored configuration in slot '{key}' is malformed: {source}")]
    Malformed {
        /// Slot key.
        key: String,
        /// JSON decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// The configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Minimal durable key-value storage.
///
/// Implementations must make `set` all-or-nothing: a reader never observes
/// a partially written value.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` if unset.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Replaces the value under `key`.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Deletes `key`, returning whether a value was present.
    fn remove(&self, key: &str) -> io::Result<bool>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Process-local store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `value` already under `key`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .lock()
            .insert(key.to_string(), value.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<bool> {
        Ok(self.lock().remove(key).is_some())
    }
}

// ---------------------------------------------------------------------------
// File backend
// ---------------------------------------------------------------------------

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a sibling temp file which is synced and then renamed over
/// the target.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        xdg::ensure_dir(&self.dir)?;
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        let written = fs::write(&temp_path, value)
            .and_then(|()| fs::File::open(&temp_path)?.sync_all())
            .and_then(|()| fs::rename(&temp_path, &path));
        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written
    }

    fn remove(&self, key: &str) -> io::Result<bool> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration adapter
// ---------------------------------------------------------------------------

/// Reads and writes the configuration slot.
pub struct ConfigStore {
    backend: Option<Box<dyn KeyValueStore>>,
}

impl ConfigStore {
    /// Adapter over the given backend.
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
        }
    }

    /// Adapter for a runtime without persistence.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Returns `true` when a backend is attached.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Loads the stored configuration.
    ///
    /// Returns `Ok(None)` when the slot is unset, blank, or persistence is
    /// unavailable. Content that does not decode is returned as
    /// [`StoreError::Malformed`].
    pub fn load(&self) -> Result<Option<Configuration>, StoreError> {
        let Some(backend) = &self.backend else {
            return Ok(None);
        };
        let raw = backend.get(CONFIG_SLOT).map_err(|source| StoreError::Read {
            key: CONFIG_SLOT.to_string(),
            source,
        })?;
        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Malformed {
                key: CONFIG_SLOT.to_string(),
                source,
            })
    }

    /// Serializes the whole configuration and writes it to the slot.
    ///
    /// Serialization completes before the backend is touched. Without a
    /// backend this does nothing.
    pub fn save(&self, config: &Configuration) -> Result<(), StoreError> {
        let Some(backend) = &self.backend else {
            return Ok(());
        };
        let json = serde_json::to_string(config).map_err(StoreError::Serialize)?;
        backend
            .set(CONFIG_SLOT, &json)
            .map_err(|source| StoreError::Write {
                key: CONFIG_SLOT.to_string(),
                source,
            })?;
        tracing::debug!(widgets = config.len(), "saved widget configuration");
        Ok(())
    }

    /// Removes the stored configuration, returning whether one existed.
    pub fn clear(&self) -> Result<bool, StoreError> {
        let Some(backend) = &self.backend else {
            return Ok(false);
        };
        backend
            .remove(CONFIG_SLOT)
            .map_err(|source| StoreError::Write {
                key: CONFIG_SLOT.to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("available", &self.is_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::defaults::build_default;

    const STORED: &str = r#"[{"name":"Clock","selected":true,"positionData":{"gridArea":"a","customPosition":true,"x":120,"y":40}},{"name":"News","selected":false,"positionData":{"gridArea":"b","customPosition":false,"x":0,"y":0}}]"#;

    #[test]
    fn load_empty_memory_store_is_none() {
        let store = ConfigStore::new(MemoryStore::new());
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn unavailable_store_loads_nothing_and_ignores_saves() {
        let store = ConfigStore::unavailable();
        assert!(!store.is_available());
        store.save(&build_default()).expect("save is a no-op");
        assert!(store.load().expect("load").is_none());
        assert!(!store.clear().expect("clear"));
    }

    #[test]
    fn save_then_load_returns_same_configuration() {
        let store = ConfigStore::new(MemoryStore::new());
        let config = build_default();
        store.save(&config).expect("save");
        assert_eq!(store.load().expect("load"), Some(config));
    }

    #[test]
    fn resaving_loaded_configuration_is_byte_identical() {
        let backend = MemoryStore::with_entry(CONFIG_SLOT, STORED);
        let store = ConfigStore::new(backend.clone());
        let loaded = store.load().expect("load").expect("stored config");
        store.save(&loaded).expect("save");
        let raw = backend.get(CONFIG_SLOT).expect("get").expect("slot set");
        assert_eq!(raw, STORED);
    }

    #[test]
    fn load_empty_string_slot_is_none() {
        let store = ConfigStore::new(MemoryStore::with_entry(CONFIG_SLOT, ""));
        assert!(store.load().expect("load").is_none());

        let store = ConfigStore::new(MemoryStore::with_entry(CONFIG_SLOT, " \n\t"));
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn malformed_content_is_an_error() {
        let store = ConfigStore::new(MemoryStore::with_entry(CONFIG_SLOT, "{not json"));
        match store.load() {
            Err(StoreError::Malformed { key, .. }) => assert_eq!(key, CONFIG_SLOT),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn save_overwrites_previous_value() {
        let backend = MemoryStore::with_entry(CONFIG_SLOT, STORED);
        let store = ConfigStore::new(backend.clone());
        store.save(&build_default()).expect("save");
        assert_eq!(store.load().expect("load"), Some(build_default()));
    }

    #[test]
    fn clear_removes_slot() {
        let store = ConfigStore::new(MemoryStore::with_entry(CONFIG_SLOT, STORED));
        assert!(store.clear().expect("clear"));
        assert!(store.load().expect("load").is_none());
        assert!(!store.clear().expect("second clear"));
    }

    // -- FileStore --

    #[test]
    fn file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = FileStore::new(dir.path());
        assert!(store.get(CONFIG_SLOT).expect("get").is_none());
    }

    #[test]
    fn blank_slot_file_loads_as_nothing_stored() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let backend = FileStore::new(dir.path());
        fs::write(backend.path_for(CONFIG_SLOT), "  \n").expect("write");
        assert_eq!(
            backend.get(CONFIG_SLOT).expect("get").as_deref(),
            Some("  \n")
        );
        assert!(ConfigStore::new(backend).load().expect("load").is_none());
    }

    #[test]
    fn file_store_creates_directory_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let nested = dir.path().join("data/tile-dashboard");
        let store = FileStore::new(&nested);
        store.set(CONFIG_SLOT, STORED).expect("set");

        let names: Vec<String> = fs::read_dir(&nested)
            .expect("read_dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["widgetConfig.json".to_string()]);
        assert_eq!(
            store.get(CONFIG_SLOT).expect("get").as_deref(),
            Some(STORED)
        );
    }

    #[test]
    fn file_store_set_replaces_content() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = FileStore::new(dir.path());
        store.set(CONFIG_SLOT, "first").expect("set");
        store.set(CONFIG_SLOT, "second").expect("set");
        assert_eq!(store.get(CONFIG_SLOT).expect("get").as_deref(), Some("second"));
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = FileStore::new(dir.path());
        // A non-empty directory at the target path makes the rename fail.
        let target = store.path_for(CONFIG_SLOT);
        fs::create_dir_all(target.join("occupied")).expect("mkdir");

        assert!(store.set(CONFIG_SLOT, STORED).is_err());
        assert!(!target.with_extension("json.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn file_store_remove() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = FileStore::new(dir.path());
        assert!(!store.remove(CONFIG_SLOT).expect("remove missing"));
        store.set(CONFIG_SLOT, STORED).expect("set");
        assert!(store.remove(CONFIG_SLOT).expect("remove"));
        assert!(!store.path_for(CONFIG_SLOT).exists());
    }

    #[test]
    fn config_store_over_file_backend_round_trips() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = ConfigStore::new(FileStore::new(dir.path()));
        let config = build_default();
        store.save(&config).expect("save");
        assert_eq!(store.load().expect("load"), Some(config));
    }

    #[test]
    fn unreadable_slot_is_read_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = FileStore::new(dir.path());
        // A directory where the slot file should be cannot be read as a string.
        fs::create_dir_all(store.path_for(CONFIG_SLOT)).expect("mkdir");
        let adapter = ConfigStore::new(store);
        assert!(matches!(adapter.load(), Err(StoreError::Read { .. })));
    }
}
