//! Service form

use guardpost_core::AdminResult;
use guardpost_model::{SHORT_DESCRIPTION_MAX, Service, validation};

use crate::form::{Draft, FieldKind, FieldSpec, FormSchema, STATUS_OPTIONS, parsed};

/// Add/edit form for services
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceForm;

impl FormSchema for ServiceForm {
    type Target = Service;

    const FORM: &'static str = "service";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("title", "Title", FieldKind::Text).required(),
        FieldSpec::new("category", "Category", FieldKind::Text).required(),
        FieldSpec::new("short_description", "Short description", FieldKind::TextArea)
            .max_length(SHORT_DESCRIPTION_MAX),
        FieldSpec::new("description", "Description", FieldKind::RichText),
        FieldSpec::new("price", "Price", FieldKind::Decimal),
        FieldSpec::new("icon", "Icon", FieldKind::File),
        FieldSpec::new("featured", "Featured", FieldKind::Flag).default_value("no"),
        FieldSpec::new("status", "Status", FieldKind::Select(STATUS_OPTIONS))
            .default_value("active"),
    ];

    fn blank() -> Service {
        Service::new("", "")
    }

    fn load(service: &Service, draft: &mut Draft) {
        draft.set("title", &service.title);
        draft.set("category", &service.category);
        draft.set("short_description", &service.short_description);
        draft.set("description", &service.description);
        draft.set(
            "price",
            service.price.map(|p| p.to_string()).unwrap_or_default(),
        );
        draft.set("icon", service.icon.clone().unwrap_or_default());
        draft.set("featured", if service.featured { "yes" } else { "no" });
        draft.set("status", service.status.as_str());
    }

    fn apply(draft: &Draft, service: &mut Service) -> AdminResult<()> {
        let form = Self::FORM;
        service.title = draft.get("title").trim().to_string();
        service.category = draft.get("category").trim().to_string();
        service.short_description = draft.get("short_description").trim().to_string();
        service.description = draft.get("description").to_string();
        service.price = parsed(
            form,
            "price",
            validation::non_negative_decimal(draft.get("price"), "Price"),
        )?;
        service.icon = draft.optional("icon");
        service.featured = parsed(
            form,
            "featured",
            validation::flag(draft.get("featured"), "Featured"),
        )?;
        service.status = draft.get("status").parse()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormView;
    use crate::state::AdminContext;
    use guardpost_store::EntityStore;

    #[tokio::test]
    async fn test_service_submit() {
        let store = EntityStore::in_memory();
        let mut view = FormView::<ServiceForm>::add(AdminContext::new(store.clone()));
        view.set("title", "Mobile Patrol").unwrap();
        view.set("category", "Patrol").unwrap();
        view.set("price", "49.5").unwrap();
        view.set("featured", "yes").unwrap();
        view.submit().await.unwrap();

        let services = store.get::<Service>();
        assert_eq!(services[0].price, Some(49.5));
        assert!(services[0].featured);
        assert!(services[0].icon.is_none());
    }

    #[tokio::test]
    async fn test_service_limits() {
        let mut view = FormView::<ServiceForm>::add(AdminContext::in_memory());
        view.set("title", "CCTV Monitoring").unwrap();
        view.set("category", "CCTV").unwrap();
        view.set("short_description", "x".repeat(SHORT_DESCRIPTION_MAX + 1))
            .unwrap();
        view.set("price", "-10").unwrap();
        view.set("featured", "maybe").unwrap();

        assert!(view.submit().await.is_err());
        assert_eq!(view.errors().len(), 3);
        assert!(view.error_for("title").is_none());
    }

    #[tokio::test]
    async fn test_service_edit_loads_flags() {
        let store = EntityStore::in_memory();
        let service = Service::new("Key Holding", "Keyholding").featured();
        store.put(std::slice::from_ref(&service)).unwrap();

        let view = FormView::<ServiceForm>::edit(AdminContext::new(store), &service.id).unwrap();
        assert_eq!(view.value("featured"), "yes");
        assert_eq!(view.value("price"), "");
    }
}
