//! Entity Store and typed repositories
//!
//! The [`EntityStore`] reads and writes whole collections as single blobs.
//! Reads never fail: a missing or unparsable blob degrades to an empty
//! collection (logged at `warn`). Writes replace the whole blob.
//!
//! [`Repository`] layers read-modify-write helpers for one record type on
//! top of the store. There are no transactions: concurrent writers race and
//! the last write wins.

use chrono::Utc;
use guardpost_core::{AdminError, AdminResult, CollectionKey, Identifiable, RecordId};
use guardpost_model::{
    Record, SupportSettings, decode_collection, decode_settings, encode_collection,
    encode_settings,
};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::medium::{KeyValueMedium, MemoryMedium};

// ============================================================================
// EntityStore
// ============================================================================

/// Accessor over a key-value medium, one blob per collection
#[derive(Clone)]
pub struct EntityStore {
    medium: Arc<dyn KeyValueMedium>,
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("medium", &self.medium.describe())
            .finish()
    }
}

impl EntityStore {
    /// Create a store over a shared medium
    pub fn new(medium: Arc<dyn KeyValueMedium>) -> Self {
        Self { medium }
    }

    /// Create a store over a fresh in-memory medium
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryMedium::new()))
    }

    /// The underlying medium
    pub fn medium(&self) -> &Arc<dyn KeyValueMedium> {
        &self.medium
    }

    /// Read the full collection for `R`
    ///
    /// Returns an empty sequence when the blob is absent or cannot be parsed.
    pub fn get<R: Record>(&self) -> Vec<R> {
        let key = R::KEY.storage_key();
        let raw = match self.medium.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No blob stored under '{}'", key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read '{}': {}", key, e);
                return Vec::new();
            }
        };

        match decode_collection::<R>(key, &raw) {
            Ok(records) => {
                debug!("Read {} record(s) from '{}'", records.len(), key);
                records
            }
            Err(e) => {
                warn!("Ignoring unreadable blob '{}': {}", key, e);
                Vec::new()
            }
        }
    }

    /// Write the full collection for `R`, replacing the stored blob
    pub fn put<R: Record>(&self, records: &[R]) -> AdminResult<()> {
        let key = R::KEY.storage_key();
        let raw = encode_collection(records)?;
        self.medium.set_item(key, &raw)?;
        debug!("Wrote {} record(s) to '{}'", records.len(), key);
        Ok(())
    }

    /// Remove a collection blob entirely
    pub fn clear(&self, collection: CollectionKey) -> AdminResult<()> {
        self.medium.remove_item(collection.storage_key())?;
        info!("Cleared {}", collection.display_name());
        Ok(())
    }

    /// Typed repository for one record type
    pub fn collection<R: Record>(&self) -> Repository<R> {
        Repository {
            store: self.clone(),
            _marker: PhantomData,
        }
    }

    /// Repository for the support settings object
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository {
            store: self.clone(),
        }
    }
}

// ============================================================================
// Repository
// ============================================================================

/// Read-modify-write access to one collection
#[derive(Debug, Clone)]
pub struct Repository<R: Record> {
    store: EntityStore,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> Repository<R> {
    /// The collection this repository manages
    pub fn key(&self) -> CollectionKey {
        R::KEY
    }

    /// The full collection, in stored order
    pub fn all(&self) -> Vec<R> {
        self.store.get::<R>()
    }

    /// Replace the full collection
    pub fn put_all(&self, records: &[R]) -> AdminResult<()> {
        self.store.put(records)
    }

    /// Find a record by id
    pub fn find(&self, id: &RecordId) -> Option<R> {
        self.all().into_iter().find(|r| r.matches_id(id))
    }

    /// Look up a record by id, reporting a not-found error
    pub fn get(&self, id: &RecordId) -> AdminResult<R> {
        self.find(id)
            .ok_or_else(|| AdminError::not_found(R::KEY.display_name(), id))
    }

    /// Append a new record
    pub fn insert(&self, record: R) -> AdminResult<()> {
        record.validate()?;
        let mut records = self.all();
        if records.iter().any(|r| r.matches_id(record.id())) {
            return Err(AdminError::DuplicateRecord {
                collection: R::KEY.display_name().to_string(),
                id: record.id().to_string(),
            });
        }
        let id = record.id().clone();
        records.push(record);
        self.put_all(&records)?;
        info!("Created {} {}", R::KEY.singular_name(), id);
        Ok(())
    }

    /// Replace the record with the same id, keeping its position
    pub fn replace(&self, record: R) -> AdminResult<()> {
        record.validate()?;
        let mut records = self.all();
        let slot = records
            .iter_mut()
            .find(|r| r.matches_id(record.id()))
            .ok_or_else(|| AdminError::not_found(R::KEY.display_name(), record.id()))?;
        let id = record.id().clone();
        *slot = record;
        self.put_all(&records)?;
        info!("Updated {} {}", R::KEY.singular_name(), id);
        Ok(())
    }

    /// Remove a record by id and rewrite the collection
    pub fn remove(&self, id: &RecordId) -> AdminResult<R> {
        let mut records = self.all();
        let pos = records
            .iter()
            .position(|r| r.matches_id(id))
            .ok_or_else(|| AdminError::not_found(R::KEY.display_name(), id))?;
        let removed = records.remove(pos);
        self.put_all(&records)?;
        info!("Deleted {} {}", R::KEY.singular_name(), id);
        Ok(removed)
    }

    /// Whether another record already uses `slug`
    pub fn slug_taken(&self, slug: &str, except: Option<&RecordId>) -> bool {
        self.all().iter().any(|r| {
            r.slug() == Some(slug) && except.is_none_or(|id| !r.matches_id(id))
        })
    }

    /// Number of stored records
    pub fn count(&self) -> usize {
        self.all().len()
    }
}

// ============================================================================
// SettingsRepository
// ============================================================================

/// Access to the single support settings object
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    store: EntityStore,
}

impl SettingsRepository {
    /// Read the settings, falling back to defaults when absent or unreadable
    pub fn load(&self) -> SupportSettings {
        let key = CollectionKey::Settings.storage_key();
        match self.store.medium.get_item(key) {
            Ok(Some(raw)) => decode_settings(key, &raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable settings blob: {}", e);
                SupportSettings::default()
            }),
            Ok(None) => SupportSettings::default(),
            Err(e) => {
                warn!("Failed to read settings: {}", e);
                SupportSettings::default()
            }
        }
    }

    /// Validate and write the settings, stamping `updated_at`
    pub fn save(&self, settings: &SupportSettings) -> AdminResult<SupportSettings> {
        use guardpost_core::Validatable;

        settings.validate()?;
        let mut stored = settings.clone();
        stored.updated_at = Some(Utc::now());
        let raw = encode_settings(&stored)?;
        self.store
            .medium
            .set_item(CollectionKey::Settings.storage_key(), &raw)?;
        info!("Saved support settings");
        Ok(stored)
    }
}

// ============================================================================
// Tests
// ============================================================================
