//! # Guardpost Core
//!
//! Core types, traits, and error handling for Guardpost Admin.
//!
//! - **Types**: record ids, status, sort options, collection keys
//! - **Traits**: `Identifiable`, `Titled`, `Published`, `Timestamped`, `Validatable`
//! - **Errors**: unified error handling with `AdminError` and `AdminResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{AdminError, AdminResult, ResultExt};
pub use traits::{Identifiable, Published, Timestamped, Titled, Validatable};
pub use types::{
    CollectionKey, RecordId, SortDirection, SortField, Status, flexible_datetime, parse_timestamp,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
