//! Persistence adapters for the tracker collections.
//!
//! The entity store talks to storage only through [`KeyValueStore`]: a value
//! is the whole serialized collection, written over the previous one. Three
//! adapters are provided:
//!
//! - [`SqliteStore`](crate::db::kv::SqliteStore): one row per key in the
//!   application database (the default)
//! - [`FileStore`]: one `<key>.json` file per key
//! - [`MemoryStore`]: process-local map, used when storage is unavailable
//!
//! Adapters hold no domain logic and never interpret the values they keep.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Storage key of the live task list.
pub const TASKS_KEY: &str = "tasks";
/// Storage key of the finished session history.
pub const SESSIONS_KEY: &str = "sessions";

/// Errors raised by persistence adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing store is gone for good; callers stop writing to it.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_))
    }
}

/// Minimal key-value boundary used by the entity store.
pub trait KeyValueStore {
    /// Returns the stored text for `key`, or `None` if nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the stored text for `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory adapter.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Adapter keeping each key in its own JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Unavailable(format!("{}: {}", dir.display(), e)))?;
        Ok(FileStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key);
        let tmp_path = path.with_extension("json.tmp");

        // Write next to the target, then rename over it.
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }
}
