//! # Guardpost Model
//!
//! Record types and rules for the content managed by Guardpost Admin.
//!
//! ## Core Concepts
//!
//! - **Record**: one persisted entity (page, banner, template or service)
//! - **Collection**: the full ordered set of records of one type, stored as a single blob
//! - **Support settings**: the single settings object, stored in its own blob
//! - **FieldErrors**: per-field validation messages produced by form checks
//!

// Module declarations
pub mod banner;
pub mod page;
pub mod record;
pub mod serialization;
pub mod service;
pub mod settings;
pub mod slug;
pub mod template;
pub mod validation;

// Re-export commonly used types at crate root
pub use banner::{Banner, BannerPlacement};
pub use page::CmsPage;
pub use record::Record;
pub use serialization::{decode_collection, decode_settings, encode_collection, encode_settings};
pub use service::{SHORT_DESCRIPTION_MAX, Service};
pub use settings::SupportSettings;
pub use slug::{derive_slug, is_valid_slug};
pub use template::{EmailTemplate, TemplateCategory};
pub use validation::FieldErrors;

// Re-export core types that are commonly used with records
pub use guardpost_core::{
    AdminError, AdminResult, CollectionKey, RecordId, SortDirection, SortField, Status,
};

/// Current schema version of stored blobs
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Tests
// ============================================================================
