//! Key-value storage media
//!
//! A medium is an opaque string-to-string store with the same shape as
//! browser local storage. The entity store serializes whole collections into
//! it; the medium itself knows nothing about records.

use guardpost_core::{AdminError, AdminResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// File extension of blobs written by [`DirectoryMedium`]
pub const BLOB_EXTENSION: &str = "json";

/// A persistent key-value medium
///
/// There is no locking across handles: two writers to the same key race and
/// the last write wins.
pub trait KeyValueMedium: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> AdminResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> AdminResult<()>;

    /// Remove `key` (a missing key is not an error)
    fn remove_item(&self, key: &str) -> AdminResult<()>;

    /// All keys currently stored, sorted
    fn keys(&self) -> AdminResult<Vec<String>>;

    /// Human-readable description for logs and status output
    fn describe(&self) -> String;
}

// ============================================================================
// MemoryMedium
// ============================================================================

/// Process-local medium backed by a map
#[derive(Debug, Default)]
pub struct MemoryMedium {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a medium pre-filled with raw values
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: RwLock::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

fn poisoned() -> AdminError {
    AdminError::StorageUnavailable("in-memory medium lock poisoned".to_string())
}

impl KeyValueMedium for MemoryMedium {
    fn get_item(&self, key: &str) -> AdminResult<Option<String>> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AdminResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AdminResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.remove(key);
        Ok(())
    }

    fn keys(&self) -> AdminResult<Vec<String>> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.keys().cloned().collect())
    }

    fn describe(&self) -> String {
        "in-memory storage".to_string()
    }
}

// ============================================================================
// DirectoryMedium
// ============================================================================

/// Medium that stores each key as `<key>.json` inside a data directory
#[derive(Debug, Clone)]
pub struct DirectoryMedium {
    root: PathBuf,
}

impl DirectoryMedium {
    /// Use `root` as the data directory (created on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> AdminResult<PathBuf> {
        if key.is_empty()
            || key.starts_with('.')
            || key.contains(['/', '\\'])
            || key.contains("..")
        {
            return Err(AdminError::validation(format!(
                "Invalid storage key '{}'",
                key
            )));
        }
        Ok(self.root.join(format!("{}.{}", key, BLOB_EXTENSION)))
    }

    fn ensure_root(&self) -> AdminResult<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| AdminError::DirectoryCreate {
                path: self.root.clone(),
                message: e.to_string(),
            })?;
            debug!("Created data directory {}", self.root.display());
        }
        Ok(())
    }
}

impl KeyValueMedium for DirectoryMedium {
    fn get_item(&self, key: &str) -> AdminResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| AdminError::FileRead {
                path,
                message: e.to_string(),
            })
    }

    fn set_item(&self, key: &str, value: &str) -> AdminResult<()> {
        let path = self.path_for(key)?;
        self.ensure_root()?;

        // Write beside the target and rename so readers never see a torn blob
        let tmp = path.with_extension(format!("{}.tmp", BLOB_EXTENSION));
        fs::write(&tmp, value).map_err(|e| AdminError::FileWrite {
            path: tmp.clone(),
            message: e.to_string(),
        })?;
        fs::rename(&tmp, &path).map_err(|e| AdminError::FileWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AdminResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AdminError::FileWrite {
                path,
                message: e.to_string(),
            }),
        }
    }

    fn keys(&self) -> AdminResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.root).map_err(|e| AdminError::FileRead {
            path: self.root.clone(),
            message: e.to_string(),
        })?;

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == BLOB_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

// ============================================================================
// Tests
// ============================================================================
