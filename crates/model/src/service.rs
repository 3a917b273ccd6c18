//! Service listing records

use chrono::{DateTime, Utc};
use guardpost_core::{
    AdminError, AdminResult, CollectionKey, RecordId, Status, Validatable, flexible_datetime,
};
use serde::{Deserialize, Serialize};

use crate::record::{Record, impl_record_accessors};

/// Longest allowed short description (card teaser)
pub const SHORT_DESCRIPTION_MAX: usize = 160;

/// A security service offered by the business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: RecordId,

    pub title: String,

    /// Free-text grouping, e.g. "Manned Guarding" or "CCTV"
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub short_description: String,

    /// Rich text body (HTML)
    #[serde(default)]
    pub description: String,

    /// Starting price, if published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Icon file reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub status: Status,

    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub created_at: DateTime<Utc>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "flexible_datetime::option::deserialize"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Service {
    /// Create a new active service
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            title: title.into(),
            category: category.into(),
            short_description: String::new(),
            description: String::new(),
            price: None,
            icon: None,
            featured: false,
            status: Status::Active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Mark as featured
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Price formatted for display
    pub fn price_label(&self) -> String {
        match self.price {
            Some(p) => format!("from {:.2}", p),
            None => "on request".to_string(),
        }
    }
}

impl_record_accessors!(Service, title);

impl Validatable for Service {
    fn validate(&self) -> AdminResult<()> {
        if self.title.trim().is_empty() {
            return Err(AdminError::field_validation("service", "title", "Title is required"));
        }
        if self.category.trim().is_empty() {
            return Err(AdminError::field_validation(
                "service",
                "category",
                "Category is required",
            ));
        }
        if self.short_description.chars().count() > SHORT_DESCRIPTION_MAX {
            return Err(AdminError::field_validation(
                "service",
                "short_description",
                format!("Short description must be at most {} characters", SHORT_DESCRIPTION_MAX),
            ));
        }
        if self.price.is_some_and(|p| !p.is_finite() || p < 0.0) {
            return Err(AdminError::field_validation(
                "service",
                "price",
                "Price must be a number of 0 or more",
            ));
        }
        Ok(())
    }
}

impl Record for Service {
    const KEY: CollectionKey = CollectionKey::Services;
    const FILTER_FIELDS: &'static [&'static str] = &["status", "category", "featured"];

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.to_string()),
            "category" => Some(self.category.clone()),
            "featured" => Some(self.featured.to_string()),
            _ => None,
        }
    }
}
