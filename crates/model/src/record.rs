//! The `Record` abstraction shared by every listable entity type
//!
//! A record knows which collection it is stored in, which fields a list
//! view may filter on, and how to read those fields as strings.

use guardpost_core::{CollectionKey, Identifiable, Published, Timestamped, Titled, Validatable};
use serde::{Serialize, de::DeserializeOwned};

/// A persisted, listable entity
pub trait Record:
    Clone
    + std::fmt::Debug
    + PartialEq
    + Serialize
    + DeserializeOwned
    + Identifiable
    + Titled
    + Published
    + Timestamped
    + Validatable
    + Send
    + Sync
    + 'static
{
    /// Collection this record type is stored in
    const KEY: CollectionKey;

    /// Fields a list view may filter on by equality
    const FILTER_FIELDS: &'static [&'static str];

    /// String value of a filterable field (`None` for unknown or unset fields)
    fn filter_value(&self, field: &str) -> Option<String>;

    /// Slug of the record, for types that have one
    fn slug(&self) -> Option<&str> {
        None
    }
}

/// Implements the core accessor traits for a record struct with the usual
/// `id`, `status`, `created_at` and `updated_at` fields and a title field.
macro_rules! impl_record_accessors {
    ($ty:ty, $title:ident) => {
        impl guardpost_core::Identifiable for $ty {
            fn id(&self) -> &guardpost_core::RecordId {
                &self.id
            }
        }

        impl guardpost_core::Titled for $ty {
            fn title(&self) -> &str {
                &self.$title
            }
        }

        impl guardpost_core::Published for $ty {
            fn status(&self) -> guardpost_core::Status {
                self.status
            }
        }

        impl guardpost_core::Timestamped for $ty {
            fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.updated_at
            }

            fn touch(&mut self) {
                self.updated_at = Some(chrono::Utc::now());
            }
        }
    };
}

pub(crate) use impl_record_accessors;
