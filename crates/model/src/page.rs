//! CMS page records
//!
//! A CMS page is a titled, slug-addressed piece of rich content with optional
//! SEO metadata.

use chrono::{DateTime, Utc};
use guardpost_core::{
    AdminError, AdminResult, CollectionKey, RecordId, Status, Validatable, flexible_datetime,
};
use serde::{Deserialize, Serialize};

use crate::record::{Record, impl_record_accessors};
use crate::slug::is_valid_slug;
use crate::validation::rich_text_plain;

/// A content page (About, Terms, Careers, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsPage {
    /// Unique identifier
    pub id: RecordId,

    /// Page title
    pub title: String,

    /// URL slug, unique within the collection
    #[serde(default)]
    pub slug: String,

    /// Rich text body (HTML)
    #[serde(default)]
    pub content: String,

    /// SEO title override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,

    /// SEO description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,

    #[serde(default)]
    pub status: Status,

    /// Creation timestamp
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "flexible_datetime::option::deserialize"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CmsPage {
    /// Create a new active page with a fresh id
    pub fn new(title: impl Into<String>, slug: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            title: title.into(),
            slug: slug.into(),
            content: content.into(),
            meta_title: None,
            meta_description: None,
            status: Status::Active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Set the status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the creation timestamp
    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Plain-text excerpt of the content, at most `max` characters
    pub fn excerpt(&self, max: usize) -> String {
        let plain = rich_text_plain(&self.content);
        if plain.chars().count() <= max {
            plain
        } else {
            let cut: String = plain.chars().take(max).collect();
            format!("{}…", cut.trim_end())
        }
    }
}

impl_record_accessors!(CmsPage, title);

impl Validatable for CmsPage {
    fn validate(&self) -> AdminResult<()> {
        if self.title.trim().is_empty() {
            return Err(AdminError::field_validation("page", "title", "Title is required"));
        }
        if !is_valid_slug(&self.slug) {
            return Err(AdminError::field_validation(
                "page",
                "slug",
                format!("'{}' is not a valid slug", self.slug),
            ));
        }
        Ok(())
    }
}

impl Record for CmsPage {
    const KEY: CollectionKey = CollectionKey::Pages;
    const FILTER_FIELDS: &'static [&'static str] = &["status"];

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}
