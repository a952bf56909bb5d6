//! Key-value persistence for service state
//!
//! Each service keeps its durable state as one JSON document under a fixed
//! key and rewrites that document wholesale after every mutation.

use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Key under which the library collection is stored
pub const LIBRARY_KEY: &str = "nook_library_books";

/// Key under which the recent-search history is stored
pub const RECENT_SEARCHES_KEY: &str = "nook_recent_searches";

/// Abstract key-value store holding UTF-8 documents
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Load and decode the JSON document under `key`
///
/// A missing key decodes to `None`; undecodable content is reported as
/// [`StorageError::Corrupt`].
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

/// Encode `value` as JSON and store it under `key`
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let data = serde_json::to_string(value)
        .map_err(|e| StorageError::BackendError(e.to_string()))?;
    store.set(key, &data)
}

/// Local filesystem store: one `<key>.json` file per key under a root directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new local store rooted at the given directory
    ///
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a key to its file, rejecting keys that could escape the root
    fn full_path(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.full_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Err(StorageError::PermissionDenied(path.display().to_string()))
            }
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    /// Writes to a temp file then renames so readers never see a partial document
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.full_path(key)?;
        std::fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        std::fs::rename(&temp_path, &path).map_err(|e| StorageError::BackendError(e.to_string()))
    }
}

/// In-memory store (for tests and throwaway sessions)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|_| StorageError::BackendError("memory store lock poisoned".to_string()))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StorageError::BackendError("memory store lock poisoned".to_string()))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
