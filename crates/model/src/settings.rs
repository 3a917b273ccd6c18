//! Support settings (a single object, not a listable collection)

use chrono::{DateTime, Utc};
use guardpost_core::{AdminError, AdminResult, Validatable, flexible_datetime};
use serde::{Deserialize, Serialize};

use crate::validation;

/// Contact and help-desk settings shown on the public site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupportSettings {
    pub support_email: String,

    pub support_phone: String,

    /// 24/7 line for alarm activations and incidents
    pub emergency_hotline: Option<String>,

    /// e.g. "Mon-Fri 08:00-18:00"
    pub business_hours: Option<String>,

    pub address: Option<String>,

    pub live_chat_enabled: bool,

    /// Sent automatically in reply to contact-form submissions
    pub auto_reply_message: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "flexible_datetime::option::deserialize"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for SupportSettings {
    fn default() -> Self {
        Self {
            support_email: String::new(),
            support_phone: String::new(),
            emergency_hotline: None,
            business_hours: None,
            address: None,
            live_chat_enabled: false,
            auto_reply_message: None,
            updated_at: None,
        }
    }
}

impl SupportSettings {
    /// Whether the settings have never been filled in
    pub fn is_unconfigured(&self) -> bool {
        self.support_email.is_empty() && self.support_phone.is_empty()
    }

    /// Update the modification timestamp to now
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl Validatable for SupportSettings {
    fn validate(&self) -> AdminResult<()> {
        if let Err(message) = validation::email(&self.support_email) {
            return Err(AdminError::field_validation("settings", "support_email", message));
        }
        if self.support_phone.trim().is_empty() {
            return Err(AdminError::field_validation(
                "settings",
                "support_phone",
                "Support phone is required",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_unconfigured() {
        let settings = SupportSettings::default();
        assert!(settings.is_unconfigured());
        assert!(!settings.is_valid());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = SupportSettings {
            support_email: "help@guardpost.example".to_string(),
            support_phone: "+44 20 0000 0000".to_string(),
            ..Default::default()
        };
        assert!(settings.is_valid());

        settings.support_email = "help".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("support_email"));
    }

    #[test]
    fn test_settings_partial_json() {
        let settings: SupportSettings =
            serde_json::from_str(r#"{"supportEmail":"a@b.co","liveChatEnabled":true}"#).unwrap();
        assert_eq!(settings.support_email, "a@b.co");
        assert!(settings.live_chat_enabled);
        assert!(settings.support_phone.is_empty());
    }
}
