//! Durable key-value storage shared by the view mode and progress records.
//!
//! Values are plain strings (JSON or bare tags), mirroring what a browser's
//! local storage would hold. Writes go straight to disk; there is no locking,
//! so two clients writing the same file race and the last write wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value store with synchronous reads and writes.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Cheaply clonable handle used by every consumer of the store.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Volatile store, used in tests and as a fallback when no data dir exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// JSON object on disk, one entry per key. The whole file is rewritten on
/// every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens (or lazily creates) the store at `path`. A corrupt file is
    /// treated as empty and will be overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable storage file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    /// `<data_dir>/storage.json` for the current user.
    pub fn default_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("dev", "hermes", "hermes")?;
        Some(proj.data_dir().join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let Ok(mut items) = self.items.lock() else {
            return Ok(());
        };
        items.insert(key.to_string(), value.to_string());
        self.flush(&items)
    }
}

/// Opens the per-user file store, degrading to memory when no data dir is
/// available or the file can't be read.
pub fn open_default_store() -> SharedStore {
    let Some(path) = FileStore::default_path() else {
        tracing::warn!("No data directory available, progress and view mode will not persist");
        return MemoryStore::shared();
    };

    match FileStore::open(&path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to open storage, using memory");
            MemoryStore::shared()
        }
    }
}
