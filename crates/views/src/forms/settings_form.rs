//! Support settings form
//!
//! Always opens in edit mode on the single settings object. A store without
//! saved settings loads the defaults.

use guardpost_core::AdminResult;
use guardpost_model::{FieldErrors, SupportSettings, validation};
use guardpost_store::SettingsRepository;
use tracing::debug;

use crate::form::{Draft, FieldKind, FieldSpec, FormSchema, FormState, parsed};
use crate::state::{AdminContext, Navigation, Notification, Route};

/// Field layout of the support settings form
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsForm;

impl FormSchema for SettingsForm {
    type Target = SupportSettings;

    const FORM: &'static str = "settings";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("support_email", "Support email", FieldKind::Email).required(),
        FieldSpec::new("support_phone", "Support phone", FieldKind::Text).required(),
        FieldSpec::new("emergency_hotline", "Emergency hotline", FieldKind::Text),
        FieldSpec::new("business_hours", "Business hours", FieldKind::Text),
        FieldSpec::new("address", "Address", FieldKind::TextArea),
        FieldSpec::new("live_chat_enabled", "Live chat", FieldKind::Flag).default_value("no"),
        FieldSpec::new("auto_reply_message", "Auto-reply message", FieldKind::TextArea)
            .max_length(1000),
    ];

    fn blank() -> SupportSettings {
        SupportSettings::default()
    }

    fn load(settings: &SupportSettings, draft: &mut Draft) {
        draft.set("support_email", &settings.support_email);
        draft.set("support_phone", &settings.support_phone);
        draft.set(
            "emergency_hotline",
            settings.emergency_hotline.clone().unwrap_or_default(),
        );
        draft.set(
            "business_hours",
            settings.business_hours.clone().unwrap_or_default(),
        );
        draft.set("address", settings.address.clone().unwrap_or_default());
        draft.set(
            "live_chat_enabled",
            if settings.live_chat_enabled { "yes" } else { "no" },
        );
        draft.set(
            "auto_reply_message",
            settings.auto_reply_message.clone().unwrap_or_default(),
        );
    }

    fn apply(draft: &Draft, settings: &mut SupportSettings) -> AdminResult<()> {
        settings.support_email = draft.get("support_email").trim().to_string();
        settings.support_phone = draft.get("support_phone").trim().to_string();
        settings.emergency_hotline = draft.optional("emergency_hotline");
        settings.business_hours = draft.optional("business_hours");
        settings.address = draft.optional("address");
        settings.live_chat_enabled = parsed(
            Self::FORM,
            "live_chat_enabled",
            validation::flag(draft.get("live_chat_enabled"), "Live chat"),
        )?;
        settings.auto_reply_message = draft.optional("auto_reply_message");
        Ok(())
    }
}

/// Edit form over the support settings object
#[derive(Debug, Clone)]
pub struct SettingsView {
    ctx: AdminContext,
    repo: SettingsRepository,
    current: SupportSettings,
    state: FormState<SettingsForm>,
}

impl SettingsView {
    /// Load the stored settings (or defaults)
    pub fn load(ctx: AdminContext) -> Self {
        let repo = ctx.store.settings();
        let current = repo.load();
        let state = FormState::loaded(&current);
        Self {
            ctx,
            repo,
            current,
            state,
        }
    }

    /// Settings as last loaded or saved
    pub fn current(&self) -> &SupportSettings {
        &self.current
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        SettingsForm::FIELDS
    }

    pub fn value(&self, field: &str) -> &str {
        self.state.value(field)
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) -> AdminResult<()> {
        self.state.set(field, value)
    }

    pub fn errors(&self) -> &FieldErrors {
        self.state.errors()
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.state.error_for(field)
    }

    pub fn validate(&mut self) -> bool {
        self.state.validate()
    }

    /// Validate and save
    pub async fn submit(&mut self) -> AdminResult<Navigation> {
        if !self.validate() {
            debug!("settings form has {} error(s)", self.errors().len());
            self.state.ensure_valid()?;
        }

        let mut next = self.current.clone();
        self.state.apply_to(&mut next)?;
        self.ctx.simulate_latency().await;
        self.current = self.repo.save(&next)?;

        Ok(Navigation::to(Route::Settings)
            .with_notification(Notification::success("Support settings saved")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardpost_store::EntityStore;

    #[test]
    fn test_settings_load_defaults() {
        let view = SettingsView::load(AdminContext::in_memory());
        assert!(view.current().is_unconfigured());
        assert_eq!(view.value("live_chat_enabled"), "no");
    }

    #[tokio::test]
    async fn test_settings_save_and_reload() {
        let store = EntityStore::in_memory();
        let mut view = SettingsView::load(AdminContext::new(store.clone()));
        view.set("support_email", "help@guardpost.example").unwrap();
        view.set("support_phone", "0800 123 456").unwrap();
        view.set("address", "  ").unwrap();

        let nav = view.submit().await.unwrap();
        assert_eq!(nav.route, Route::Settings);
        assert!(view.current().updated_at.is_some());

        let stored = store.settings().load();
        assert_eq!(stored.support_email, "help@guardpost.example");
        assert!(stored.address.is_none());

        let reopened = SettingsView::load(AdminContext::new(store));
        assert_eq!(reopened.value("support_phone"), "0800 123 456");
    }

    #[tokio::test]
    async fn test_settings_invalid_email() {
        let store = EntityStore::in_memory();
        let mut view = SettingsView::load(AdminContext::new(store.clone()));
        view.set("support_email", "help@localhost").unwrap();
        view.set("support_phone", "0800").unwrap();
        assert!(view.submit().await.is_err());
        assert!(view.error_for("support_email").is_some());
        assert!(store.settings().load().is_unconfigured());
    }
}
