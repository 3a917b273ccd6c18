//! Stored blob format for collections and settings
//!
//! Every collection is persisted as one JSON blob under its storage key,
//! wrapped in a versioned envelope:
//!
//! ```json
//! { "schema_version": 1, "records": [ ... ] }
//! ```
//!
//! Settings use the same envelope with a `settings` payload. Blobs written
//! before the envelope existed (a bare array or object) are read as
//! version 0 and migrated forward.

use crate::SCHEMA_VERSION;
use crate::settings::SupportSettings;
use guardpost_core::{AdminError, AdminResult};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Payload field of a collection envelope
const RECORDS_FIELD: &str = "records";

/// Payload field of a settings envelope
const SETTINGS_FIELD: &str = "settings";

// ============================================================================
// Envelopes
// ============================================================================

/// Envelope written for every collection blob
#[derive(Debug, Serialize)]
struct CollectionBlob<'a, R> {
    schema_version: u32,
    records: &'a [R],
}

/// Envelope written for the settings blob
#[derive(Debug, Serialize)]
struct SettingsBlob<'a> {
    schema_version: u32,
    settings: &'a SupportSettings,
}

// ============================================================================
// Migration
// ============================================================================

/// A raw blob after its version has been determined
#[derive(Debug)]
struct VersionedBlob {
    version: u32,
    value: Value,
}

impl VersionedBlob {
    fn parse(key: &str, raw: &str, payload_field: &str) -> AdminResult<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| AdminError::InvalidBlob {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        let version = match value.get("schema_version") {
            Some(v) => {
                let found = v.as_u64().ok_or_else(|| AdminError::InvalidBlob {
                    key: key.to_string(),
                    message: "schema_version is not a number".to_string(),
                })?;
                u32::try_from(found).map_err(|_| AdminError::SchemaVersionMismatch {
                    expected: SCHEMA_VERSION,
                    found: u32::MAX,
                })?
            }
            None => 0,
        };

        if version > SCHEMA_VERSION {
            return Err(AdminError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found: version,
            });
        }

        let mut blob = Self { version, value };
        blob.migrate(payload_field)?;
        Ok(blob)
    }

    /// Check if migration is needed
    fn needs_migration(&self) -> bool {
        self.version < SCHEMA_VERSION
    }

    /// Migrate to the latest schema version, one step at a time
    fn migrate(&mut self, payload_field: &str) -> AdminResult<()> {
        while self.needs_migration() {
            self.migrate_one_version(payload_field)?;
        }
        Ok(())
    }

    fn migrate_one_version(&mut self, payload_field: &str) -> AdminResult<()> {
        match self.version {
            0 => {
                // Bare payload from before the envelope existed
                let payload = std::mem::take(&mut self.value);
                let mut envelope = serde_json::Map::new();
                envelope.insert("schema_version".to_string(), Value::from(1u32));
                envelope.insert(payload_field.to_string(), payload);
                self.value = Value::Object(envelope);
                self.version = 1;
                tracing::debug!("Migrated stored blob from version 0 to 1");
            }
            other => {
                return Err(AdminError::internal(format!(
                    "No migration from schema version {}",
                    other
                )));
            }
        }
        Ok(())
    }

    fn into_payload(mut self, key: &str, payload_field: &str) -> AdminResult<Value> {
        self.value
            .get_mut(payload_field)
            .map(Value::take)
            .ok_or_else(|| AdminError::InvalidBlob {
                key: key.to_string(),
                message: format!("missing '{}' field", payload_field),
            })
    }
}

// ============================================================================
// Collections
// ============================================================================

/// Serialize a collection into its stored blob
pub fn encode_collection<R: Serialize>(records: &[R]) -> AdminResult<String> {
    let blob = CollectionBlob {
        schema_version: SCHEMA_VERSION,
        records,
    };
    serde_json::to_string(&blob).map_err(Into::into)
}

/// Parse a stored collection blob
///
/// `key` is only used to label errors.
pub fn decode_collection<R: DeserializeOwned>(key: &str, raw: &str) -> AdminResult<Vec<R>> {
    let blob = VersionedBlob::parse(key, raw, RECORDS_FIELD)?;
    let payload = blob.into_payload(key, RECORDS_FIELD)?;
    serde_json::from_value(payload).map_err(|e| AdminError::InvalidBlob {
        key: key.to_string(),
        message: e.to_string(),
    })
}

// ============================================================================
// Settings
// ============================================================================

/// Serialize the settings object into its stored blob
pub fn encode_settings(settings: &SupportSettings) -> AdminResult<String> {
    let blob = SettingsBlob {
        schema_version: SCHEMA_VERSION,
        settings,
    };
    serde_json::to_string(&blob).map_err(Into::into)
}

/// Parse a stored settings blob
pub fn decode_settings(key: &str, raw: &str) -> AdminResult<SupportSettings> {
    let blob = VersionedBlob::parse(key, raw, SETTINGS_FIELD)?;
    let payload = blob.into_payload(key, SETTINGS_FIELD)?;
    serde_json::from_value(payload).map_err(|e| AdminError::InvalidBlob {
        key: key.to_string(),
        message: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Banner, CmsPage};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collection_round_trip_preserves_order() {
        let pages = vec![
            CmsPage::new("Zeta", "zeta", "<p>z</p>"),
            CmsPage::new("Alpha", "alpha", "<p>a</p>"),
            CmsPage::new("Mid", "mid", "<p>m</p>"),
        ];
        let raw = encode_collection(&pages).unwrap();
        assert!(raw.contains("\"schema_version\":1"));

        let back: Vec<CmsPage> = decode_collection("pages", &raw).unwrap();
        assert_eq!(back, pages);
    }

    #[test]
    fn test_legacy_bare_array_is_migrated() {
        let raw = r#"[{"id":"1","title":"Promo","image":"promo.png","createdAt":"2024-05-01"}]"#;
        let banners: Vec<Banner> = decode_collection("banners", raw).unwrap();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].image, "promo.png");
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let raw = r#"{"schema_version":99,"records":[]}"#;
        let err = decode_collection::<CmsPage>("pages", raw).unwrap_err();
        assert!(matches!(
            err,
            AdminError::SchemaVersionMismatch { expected: 1, found: 99 }
        ));
    }

    #[test]
    fn test_malformed_blob_is_an_error() {
        assert!(decode_collection::<CmsPage>("pages", "{not json").is_err());
        assert!(decode_collection::<CmsPage>("pages", r#"{"schema_version":1}"#).is_err());
        assert!(decode_collection::<CmsPage>("pages", r#"[{"title":1}]"#).is_err());
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = SupportSettings {
            support_email: "help@example.com".to_string(),
            support_phone: "555-0100".to_string(),
            live_chat_enabled: true,
            ..Default::default()
        };
        let raw = encode_settings(&settings).unwrap();
        assert_eq!(decode_settings("settings", &raw).unwrap(), settings);
    }

    #[test]
    fn test_legacy_settings_object() {
        let raw = r#"{"supportEmail":"old@example.com","supportPhone":"1"}"#;
        let settings = decode_settings("settings", raw).unwrap();
        assert_eq!(settings.support_email, "old@example.com");
    }
}
