//! Form schemas for each managed collection and the settings form

mod banner_form;
mod page_form;
mod service_form;
mod settings_form;
mod template_form;

pub use banner_form::{BannerForm, PLACEMENT_OPTIONS};
pub use page_form::PageForm;
pub use service_form::ServiceForm;
pub use settings_form::{SettingsForm, SettingsView};
pub use template_form::{CATEGORY_OPTIONS, TemplateForm};

use crate::form::FormView;

pub type PageFormView = FormView<PageForm>;
pub type BannerFormView = FormView<BannerForm>;
pub type TemplateFormView = FormView<TemplateForm>;
pub type ServiceFormView = FormView<ServiceForm>;

/// Format an optional date for a date input
pub(crate) fn date_input(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
