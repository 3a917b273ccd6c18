//! Core types used throughout Guardpost Admin
//!
//! This module contains the identifiers and small enumerations shared by the
//! record model, the storage layer and the views.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AdminError;

// ============================================================================
// Record Identifiers
// ============================================================================

/// Stable unique identifier of a record within its collection
///
/// New ids are time-ordered UUIDv7 strings. Any non-empty string read back
/// from storage is accepted so that older blobs keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh, never reused id
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an existing id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// Status
// ============================================================================

/// Publication status of a listable record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    /// All variants in display order
    pub fn all() -> &'static [Status] {
        &[Status::Active, Status::Inactive]
    }

    /// Lowercase storage/display value
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }

    /// Check if the record is published
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            other => Err(AdminError::validation(format!(
                "Status must be 'active' or 'inactive', got '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Sort direction for list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Return the opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply the direction to an ascending ordering
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Fields a list view can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    #[default]
    CreatedAt,
}

impl SortField {
    /// Column label shown in list headers
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Title => "Title",
            SortField::CreatedAt => "Created",
        }
    }
}

impl FromStr for SortField {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "title" | "name" => Ok(SortField::Title),
            "created-at" | "createdat" | "created" => Ok(SortField::CreatedAt),
            other => Err(AdminError::validation(format!(
                "Cannot sort by '{}' (expected title or created-at)",
                other
            ))),
        }
    }
}

// ============================================================================
// Collection Keys
// ============================================================================

/// The logical entity types, one persisted blob each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionKey {
    Banners,
    Pages,
    Templates,
    Services,
    Settings,
}

impl CollectionKey {
    /// All collection keys
    pub fn all() -> &'static [CollectionKey] {
        &[
            CollectionKey::Banners,
            CollectionKey::Pages,
            CollectionKey::Templates,
            CollectionKey::Services,
            CollectionKey::Settings,
        ]
    }

    /// Collections that have a list view
    pub fn listable() -> &'static [CollectionKey] {
        &[
            CollectionKey::Banners,
            CollectionKey::Pages,
            CollectionKey::Templates,
            CollectionKey::Services,
        ]
    }

    /// Fixed storage key of the collection blob
    pub fn storage_key(&self) -> &'static str {
        match self {
            CollectionKey::Banners => "guardpost.banners",
            CollectionKey::Pages => "guardpost.pages",
            CollectionKey::Templates => "guardpost.templates",
            CollectionKey::Services => "guardpost.services",
            CollectionKey::Settings => "guardpost.settings",
        }
    }

    /// Short name used on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            CollectionKey::Banners => "banners",
            CollectionKey::Pages => "pages",
            CollectionKey::Templates => "templates",
            CollectionKey::Services => "services",
            CollectionKey::Settings => "settings",
        }
    }

    /// Human-readable plural name
    pub fn display_name(&self) -> &'static str {
        match self {
            CollectionKey::Banners => "Banners",
            CollectionKey::Pages => "CMS Pages",
            CollectionKey::Templates => "Email Templates",
            CollectionKey::Services => "Services",
            CollectionKey::Settings => "Support Settings",
        }
    }

    /// Human-readable singular name
    pub fn singular_name(&self) -> &'static str {
        match self {
            CollectionKey::Banners => "Banner",
            CollectionKey::Pages => "Page",
            CollectionKey::Templates => "Email template",
            CollectionKey::Services => "Service",
            CollectionKey::Settings => "Support settings",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CollectionKey {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "banners" | "banner" => Ok(CollectionKey::Banners),
            "pages" | "page" | "cms" => Ok(CollectionKey::Pages),
            "templates" | "template" | "email-templates" => Ok(CollectionKey::Templates),
            "services" | "service" => Ok(CollectionKey::Services),
            "settings" | "support" => Ok(CollectionKey::Settings),
            other => Err(AdminError::CollectionNotFound(other.to_string())),
        }
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Parse a stored date string into a UTC timestamp
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS` (assumed UTC) and plain
/// `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serde helper for timestamps written by older clients
pub mod flexible_datetime {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
    }

    /// Same as above for optional fields (empty strings read as `None`)
    pub mod option {
        use super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => parse_timestamp(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw))),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
