//! Core traits for Guardpost Admin
//!
//! This module defines the behaviors that records and drafts implement so
//! that the storage layer and the generic list view can work on any entity
//! type.

use crate::error::AdminResult;
use crate::types::{RecordId, Status};
use chrono::{DateTime, Utc};

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// # Example
///
/// ```rust,ignore
/// use guardpost_core::{AdminError, AdminResult, Validatable};
///
/// struct Contact {
///     email: String,
/// }
///
/// impl Validatable for Contact {
///     fn validate(&self) -> AdminResult<()> {
///         if !self.email.contains('@') {
///             return Err(AdminError::validation("Invalid email format"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    fn validate(&self) -> AdminResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Identifiable Trait
// ============================================================================

/// Trait for types that have a stable record id
pub trait Identifiable {
    /// Get the unique identifier
    fn id(&self) -> &RecordId;

    /// Check if this matches another identifier
    fn matches_id(&self, id: &RecordId) -> bool {
        self.id() == id
    }
}

// ============================================================================
// Titled Trait
// ============================================================================

/// Trait for types with a display title (the searchable field)
pub trait Titled {
    /// Get the title
    fn title(&self) -> &str;

    /// Case-insensitive substring match against the title
    ///
    /// A blank term matches everything. Any other term is matched as
    /// typed, surrounding spaces included.
    fn title_contains(&self, term: &str) -> bool {
        term.trim().is_empty() || self.title().to_lowercase().contains(&term.to_lowercase())
    }
}

// ============================================================================
// Published Trait
// ============================================================================

/// Trait for records that carry an active/inactive status
pub trait Published {
    /// Get the status
    fn status(&self) -> Status;

    /// Check if the record is active
    fn is_active(&self) -> bool {
        self.status().is_active()
    }
}

// ============================================================================
// Timestamped Trait
// ============================================================================

/// Trait for types that track creation and modification times
pub trait Timestamped {
    /// Creation timestamp, fixed at creation
    fn created_at(&self) -> DateTime<Utc>;

    /// Last modification timestamp, if ever edited
    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// Update the modification timestamp to now
    fn touch(&mut self);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminError;

    struct Item {
        id: RecordId,
        title: String,
    }

    impl Identifiable for Item {
        fn id(&self) -> &RecordId {
            &self.id
        }
    }

    impl Titled for Item {
        fn title(&self) -> &str {
            &self.title
        }
    }

    impl Validatable for Item {
        fn validate(&self) -> AdminResult<()> {
            if self.title.trim().is_empty() {
                Err(AdminError::validation("Title is required"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_title_contains_case_insensitive() {
        let item = Item {
            id: RecordId::new("1"),
            title: "Mobile Patrol Services".to_string(),
        };
        assert!(item.title_contains("patrol"));
        assert!(item.title_contains("MOBILE"));
        assert!(item.title_contains(""));
        assert!(item.title_contains("   "));
        assert!(!item.title_contains("cctv"));
    }

    #[test]
    fn test_title_contains_keeps_surrounding_spaces() {
        let item = Item {
            id: RecordId::new("1"),
            title: "Careers".to_string(),
        };
        assert!(!item.title_contains(" c"));
        assert!(!item.title_contains("careers "));
        assert!(item.title_contains("care"));

        let item = Item {
            id: RecordId::new("2"),
            title: "Terms of Service".to_string(),
        };
        assert!(item.title_contains(" s"));
        assert!(item.title_contains("OF "));
    }

    #[test]
    fn test_matches_id() {
        let item = Item {
            id: RecordId::new("abc"),
            title: "x".to_string(),
        };
        assert!(item.matches_id(&RecordId::new("abc")));
        assert!(!item.matches_id(&RecordId::new("abd")));
    }

    #[test]
    fn test_validatable_trait() {
        let valid = Item {
            id: RecordId::new("1"),
            title: "About".to_string(),
        };
        assert!(valid.is_valid());

        let invalid = Item {
            id: RecordId::new("2"),
            title: " ".to_string(),
        };
        assert!(!invalid.is_valid());
    }
}
