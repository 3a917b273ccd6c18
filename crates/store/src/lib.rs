//! # Guardpost Store
//!
//! Persistence for Guardpost Admin.
//!
//! Collections are stored as single blobs in a [`KeyValueMedium`], either
//! in memory or as one JSON file per collection in a data directory. The
//! [`EntityStore`] is cloned into every view that needs it.
//!

pub mod entity_store;
pub mod medium;

pub use entity_store::{EntityStore, Repository, SettingsRepository};
pub use medium::{BLOB_EXTENSION, DirectoryMedium, KeyValueMedium, MemoryMedium};

use std::path::Path;
use std::sync::Arc;

/// Open a store backed by the data directory at `path`
pub fn open_directory(path: impl AsRef<Path>) -> EntityStore {
    let medium = DirectoryMedium::new(path.as_ref());
    tracing::debug!("Opening {}", medium.describe());
    EntityStore::new(Arc::new(medium))
}
