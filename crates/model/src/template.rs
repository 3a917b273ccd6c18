//! Email template records

use chrono::{DateTime, Utc};
use guardpost_core::{
    AdminError, AdminResult, CollectionKey, RecordId, Status, Validatable, flexible_datetime,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::{Record, impl_record_accessors};
use crate::slug::is_valid_slug;

/// Kind of email a template is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    #[default]
    Transactional,
    Marketing,
    Notification,
}

impl TemplateCategory {
    pub fn all() -> &'static [TemplateCategory] {
        &[
            TemplateCategory::Transactional,
            TemplateCategory::Marketing,
            TemplateCategory::Notification,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Transactional => "transactional",
            TemplateCategory::Marketing => "marketing",
            TemplateCategory::Notification => "notification",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        TemplateCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                "Category must be one of transactional, marketing, notification".to_string()
            })
    }
}

/// An email template with `{{variable}}` placeholders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    pub id: RecordId,

    /// Display name (the searchable title)
    pub name: String,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub subject: String,

    /// Rich text body (HTML)
    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub category: TemplateCategory,

    /// Placeholder names available to the body and subject
    #[serde(default)]
    pub variables: Vec<String>,

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

impl EmailTemplate {
    /// Create a new active transactional template
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            slug: slug.into(),
            subject: subject.into(),
            body: body.into(),
            category: TemplateCategory::Transactional,
            variables: Vec::new(),
            status: Status::Active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Substitute `{{name}}` placeholders in subject and body
    ///
    /// Placeholders without a value are left untouched.
    pub fn render(&self, values: &[(&str, &str)]) -> (String, String) {
        let mut subject = self.subject.clone();
        let mut body = self.body.clone();
        for (name, value) in values {
            let placeholder = format!("{{{{{}}}}}", name);
            subject = subject.replace(&placeholder, value);
            body = body.replace(&placeholder, value);
        }
        (subject, body)
    }
}

impl_record_accessors!(EmailTemplate, name);

impl Validatable for EmailTemplate {
    fn validate(&self) -> AdminResult<()> {
        if self.name.trim().is_empty() {
            return Err(AdminError::field_validation("template", "name", "Name is required"));
        }
        if !is_valid_slug(&self.slug) {
            return Err(AdminError::field_validation(
                "template",
                "slug",
                format!("'{}' is not a valid slug", self.slug),
            ));
        }
        if self.subject.trim().is_empty() {
            return Err(AdminError::field_validation(
                "template",
                "subject",
                "Subject is required",
            ));
        }
        Ok(())
    }
}

impl Record for EmailTemplate {
    const KEY: CollectionKey = CollectionKey::Templates;
    const FILTER_FIELDS: &'static [&'static str] = &["status", "category"];

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.to_string()),
            "category" => Some(self.category.to_string()),
            _ => None,
        }
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}
