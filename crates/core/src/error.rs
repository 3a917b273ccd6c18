//! Error types for Guardpost Admin
//!
//! This module provides unified error handling across the workspace,
//! including validation errors, not-found errors, storage I/O errors and
//! serialization errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Guardpost Admin
#[derive(Debug, Error)]
pub enum AdminError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single field failed validation
    #[error("Field validation failed for '{form}.{field}': {message}")]
    FieldValidation {
        form: String,
        field: String,
        message: String,
    },

    /// A form was submitted with one or more invalid fields
    #[error("Form '{form}' has {count} invalid field(s)")]
    FormInvalid { form: String, count: usize },

    /// A field name that the form or collection does not know about
    #[error("Unknown field '{field}' for '{form}'")]
    UnknownField { form: String, field: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Record id absent from its collection
    #[error("{collection} record not found: {id}")]
    RecordNotFound { collection: String, id: String },

    /// Unknown collection name
    #[error("Unknown collection: {0}")]
    CollectionNotFound(String),

    // ========================================================================
    // Duplicate Errors
    // ========================================================================
    /// A record with the same id already exists
    #[error("Duplicate record id '{id}' in {collection}")]
    DuplicateRecord { collection: String, id: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    /// The storage medium refused the operation
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Stored blob does not have the expected shape
    #[error("Invalid stored blob for '{key}': {message}")]
    InvalidBlob { key: String, message: String },

    /// Stored blob was written by a newer schema
    #[error("Schema version mismatch: expected at most {expected}, found {found}")]
    SchemaVersionMismatch { expected: u32, found: u32 },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl AdminError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AdminError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(
        form: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        AdminError::FieldValidation {
            form: form.into(),
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create an unknown field error
    pub fn unknown_field(form: impl Into<String>, field: impl Into<String>) -> Self {
        AdminError::UnknownField {
            form: form.into(),
            field: field.into(),
        }
    }

    /// Create a record not found error
    pub fn not_found(collection: impl Into<String>, id: impl ToString) -> Self {
        AdminError::RecordNotFound {
            collection: collection.into(),
            id: id.to_string(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        AdminError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        AdminError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AdminError::Validation(_)
                | AdminError::FieldValidation { .. }
                | AdminError::FormInvalid { .. }
                | AdminError::UnknownField { .. }
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AdminError::RecordNotFound { .. } | AdminError::CollectionNotFound(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            AdminError::Io(_)
                | AdminError::FileRead { .. }
                | AdminError::FileWrite { .. }
                | AdminError::DirectoryCreate { .. }
                | AdminError::StorageUnavailable(_)
        )
    }
}

/// Result type alias using AdminError
pub type AdminResult<T> = Result<T, AdminError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> AdminResult<T>;
}

impl<T, E: Into<AdminError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> AdminResult<T> {
        self.map_err(|e| {
            let err: AdminError = e.into();
            AdminError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
