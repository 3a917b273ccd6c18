//! Field-level validation for Guardpost Admin forms
//!
//! Validation produces a [`FieldErrors`] map (field name to message) so that
//! each message can be shown beside its input and cleared on its own.

use chrono::{DateTime, Utc};
use guardpost_core::{AdminError, AdminResult};
use regex::Regex;
use std::sync::LazyLock;

use crate::slug::is_valid_slug;

/// Matches any markup tag
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Template placeholder names
static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("variable pattern is valid"));

// ============================================================================
// FieldErrors
// ============================================================================

/// Per-field validation messages, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field (the first message per field wins)
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if !self.contains(&field) {
            self.entries.push((field, message.into()));
        }
    }

    /// Record the error from a rule result, if any
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    /// Remove the message for a single field
    pub fn clear_field(&mut self, field: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(f, _)| f != field);
        before != self.entries.len()
    }

    /// Remove every message
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Message for a field, if it has one
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    /// Check if a field has an error
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterate over `(field, message)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// Merge another error set into this one
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.entries {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Convert to AdminResult (fails if any errors)
    pub fn into_result(self, form: &str) -> AdminResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AdminError::FormInvalid {
                form: form.to_string(),
                count: self.len(),
            })
        }
    }

    /// Convert the first error into a single field validation error
    pub fn first_error(&self, form: &str) -> Option<AdminError> {
        self.entries
            .first()
            .map(|(field, message)| AdminError::field_validation(form, field, message))
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Value must contain a non-whitespace character
pub fn required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

/// Value must be at most `max` characters
pub fn max_length(value: &str, max: usize, label: &str) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("{} must be at most {} characters", label, max))
    } else {
        Ok(())
    }
}

/// Value must be a well-formed slug
pub fn slug(value: &str) -> Result<(), String> {
    if is_valid_slug(value) {
        Ok(())
    } else {
        Err("Slug may only contain lowercase letters, numbers and single hyphens".to_string())
    }
}

/// Strip markup and non-breaking spaces from rich text
pub fn rich_text_plain(html: &str) -> String {
    let text = TAG_RE.replace_all(html, " ");
    text.replace("&nbsp;", " ").trim().to_string()
}

/// Rich text must have visible content once markup is removed
pub fn rich_text(value: &str, label: &str) -> Result<(), String> {
    if rich_text_plain(value).is_empty() {
        Err(format!("{} cannot be empty", label))
    } else {
        Ok(())
    }
}

/// Value must be an absolute http(s) URL
pub fn http_url(value: &str, label: &str) -> Result<(), String> {
    match url::Url::parse(value.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(format!("{} must be a valid http(s) URL", label)),
    }
}

/// Minimal address check: one `@`, non-empty local part, dotted domain
pub fn email(value: &str) -> Result<(), String> {
    let value = value.trim();
    let invalid = || Err("Enter a valid email address".to_string());
    let Some((local, domain)) = value.split_once('@') else {
        return invalid();
    };
    if local.is_empty()
        || domain.contains('@')
        || value.contains(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return invalid();
    }
    Ok(())
}

/// Parse a non-negative integer, `None` for blank input
pub fn non_negative_integer(value: &str, label: &str) -> Result<Option<u32>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| format!("{} must be a whole number of 0 or more", label))
}

/// Parse a non-negative decimal, `None` for blank input
pub fn non_negative_decimal(value: &str, label: &str) -> Result<Option<f64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
        _ => Err(format!("{} must be a number of 0 or more", label)),
    }
}

/// Parse a date, `None` for blank input
pub fn optional_date(value: &str, label: &str) -> Result<Option<DateTime<Utc>>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    guardpost_core::parse_timestamp(value)
        .map(Some)
        .ok_or_else(|| format!("{} must be a date (YYYY-MM-DD)", label))
}

/// End must not be before start when both are present
pub fn date_order(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Result<(), String> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err("End date must be on or after the start date".to_string()),
        _ => Ok(()),
    }
}

/// Split a comma-separated placeholder list and check every name
pub fn variable_list(value: &str) -> Result<Vec<String>, String> {
    let names: Vec<String> = value
        .split(',')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if let Some(bad) = names.iter().find(|n| !VARIABLE_RE.is_match(n)) {
        return Err(format!(
            "Invalid variable '{}': use lowercase letters, digits and underscores",
            bad
        ));
    }
    Ok(names)
}

/// Parse a yes/no style flag
pub fn flag(value: &str, label: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "off" | "0" => Ok(false),
        "true" | "yes" | "on" | "1" => Ok(true),
        _ => Err(format!("{} must be yes or no", label)),
    }
}

// ============================================================================
// Tests
// ============================================================================
