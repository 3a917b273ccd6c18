//! Email template form

use guardpost_core::AdminResult;
use guardpost_model::{EmailTemplate, TemplateCategory, validation};

use crate::form::{Draft, FieldKind, FieldSpec, FormSchema, STATUS_OPTIONS, SlugBinding, parsed};

/// Allowed template categories
pub const CATEGORY_OPTIONS: &[&str] = &["transactional", "marketing", "notification"];

/// Add/edit form for email templates
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateForm;

impl FormSchema for TemplateForm {
    type Target = EmailTemplate;

    const FORM: &'static str = "template";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("slug", "Slug", FieldKind::Slug).required(),
        FieldSpec::new("subject", "Subject", FieldKind::Text).required(),
        FieldSpec::new("body", "Body", FieldKind::RichText).required(),
        FieldSpec::new("category", "Category", FieldKind::Select(CATEGORY_OPTIONS))
            .default_value("transactional"),
        FieldSpec::new("variables", "Variables", FieldKind::VariableList),
        FieldSpec::new("status", "Status", FieldKind::Select(STATUS_OPTIONS))
            .default_value("active"),
    ];

    const SLUG: Option<SlugBinding> = Some(SlugBinding {
        source: "name",
        target: "slug",
    });

    fn blank() -> EmailTemplate {
        EmailTemplate::new("", "", "", "")
    }

    fn load(template: &EmailTemplate, draft: &mut Draft) {
        draft.set("name", &template.name);
        draft.set("slug", &template.slug);
        draft.set("subject", &template.subject);
        draft.set("body", &template.body);
        draft.set("category", template.category.as_str());
        draft.set("variables", template.variables.join(", "));
        draft.set("status", template.status.as_str());
    }

    fn apply(draft: &Draft, template: &mut EmailTemplate) -> AdminResult<()> {
        let form = Self::FORM;
        template.name = draft.get("name").trim().to_string();
        template.slug = draft.get("slug").trim().to_string();
        template.subject = draft.get("subject").trim().to_string();
        template.body = draft.get("body").to_string();
        template.category = parsed(
            form,
            "category",
            draft.get("category").parse::<TemplateCategory>(),
        )?;
        template.variables = parsed(
            form,
            "variables",
            validation::variable_list(draft.get("variables")),
        )?;
        template.status = draft.get("status").parse()?;
        Ok(())
    }
}
