//! CMS page form

use guardpost_core::AdminResult;
use guardpost_model::CmsPage;

use crate::form::{Draft, FieldKind, FieldSpec, FormSchema, STATUS_OPTIONS, SlugBinding};

/// Add/edit form for CMS pages
#[derive(Debug, Clone, Copy, Default)]
pub struct PageForm;

impl FormSchema for PageForm {
    type Target = CmsPage;

    const FORM: &'static str = "page";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("title", "Title", FieldKind::Text).required(),
        FieldSpec::new("slug", "Slug", FieldKind::Slug).required(),
        FieldSpec::new("content", "Content", FieldKind::RichText).required(),
        FieldSpec::new("meta_title", "Meta title", FieldKind::Text).max_length(70),
        FieldSpec::new("meta_description", "Meta description", FieldKind::TextArea)
            .max_length(160),
        FieldSpec::new("status", "Status", FieldKind::Select(STATUS_OPTIONS))
            .default_value("active"),
    ];

    const SLUG: Option<SlugBinding> = Some(SlugBinding {
        source: "title",
        target: "slug",
    });

    fn blank() -> CmsPage {
        CmsPage::new("", "", "")
    }

    fn load(page: &CmsPage, draft: &mut Draft) {
        draft.set("title", &page.title);
        draft.set("slug", &page.slug);
        draft.set("content", &page.content);
        draft.set("meta_title", page.meta_title.clone().unwrap_or_default());
        draft.set(
            "meta_description",
            page.meta_description.clone().unwrap_or_default(),
        );
        draft.set("status", page.status.as_str());
    }

    fn apply(draft: &Draft, page: &mut CmsPage) -> AdminResult<()> {
        page.title = draft.get("title").trim().to_string();
        page.slug = draft.get("slug").trim().to_string();
        page.content = draft.get("content").to_string();
        page.meta_title = draft.optional("meta_title");
        page.meta_description = draft.optional("meta_description");
        page.status = draft.get("status").parse()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormView;
    use crate::state::{AdminContext, Route};
    use guardpost_core::{AdminError, CollectionKey, Status};
    use guardpost_store::EntityStore;

    fn fill(view: &mut FormView<PageForm>, title: &str) {
        view.set("title", title).unwrap();
        view.set("content", "<p>Body</p>").unwrap();
    }

    #[test]
    fn test_slug_follows_title() {
        let mut view = FormView::<PageForm>::add(AdminContext::in_memory());
        view.set("title", "My Page").unwrap();
        assert_eq!(view.value("slug"), "my-page");
        assert!(!view.slug().unwrap().user_overridden);

        view.set("slug", "custom-slug").unwrap();
        view.set("title", "Renamed Page").unwrap();
        assert_eq!(view.value("slug"), "custom-slug");
        assert!(view.slug().unwrap().user_overridden);
    }

    #[test]
    fn test_clearing_slug_resumes_derivation() {
        let mut view = FormView::<PageForm>::add(AdminContext::in_memory());
        view.set("slug", "custom").unwrap();
        view.set("slug", "").unwrap();
        view.set("title", "Our Team").unwrap();
        assert_eq!(view.value("slug"), "our-team");
    }

    #[tokio::test]
    async fn test_add_derives_empty_slug_at_submit() {
        let store = EntityStore::in_memory();
        let mut view = FormView::<PageForm>::add(AdminContext::new(store.clone()));
        fill(&mut view, "My Page");
        view.set("slug", "").unwrap();

        let nav = view.submit().await.unwrap();
        assert_eq!(nav.route, Route::List(CollectionKey::Pages));

        let pages = store.get::<CmsPage>();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].slug, "my-page");
        assert_eq!(pages[0].status, Status::Active);
        assert!(pages[0].updated_at.is_none());
    }

    #[tokio::test]
    async fn test_bad_slug_blocks_submit() {
        let store = EntityStore::in_memory();
        let mut view = FormView::<PageForm>::add(AdminContext::new(store.clone()));
        fill(&mut view, "My Page");
        view.set("slug", "My Page!").unwrap();

        let err = view.submit().await.unwrap_err();
        assert!(matches!(err, AdminError::FormInvalid { .. }));
        assert!(view.error_for("slug").is_some());
        assert!(store.get::<CmsPage>().is_empty());

        // Editing the slug clears only its own error
        view.set("content", "").unwrap();
        assert!(!view.validate());
        assert!(view.error_for("content").is_some());
        view.set("slug", "my-page").unwrap();
        assert!(view.error_for("slug").is_none());
        assert!(view.error_for("content").is_some());
    }

    #[tokio::test]
    async fn test_missing_fields_reported_per_field() {
        let mut view = FormView::<PageForm>::add(AdminContext::in_memory());
        assert!(view.submit().await.is_err());
        let fields: Vec<&str> = view.errors().iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["title", "slug", "content"]);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let store = EntityStore::in_memory();
        store
            .put(&[CmsPage::new("About", "about", "<p>a</p>")])
            .unwrap();

        let mut view = FormView::<PageForm>::add(AdminContext::new(store.clone()));
        fill(&mut view, "About");
        assert!(view.submit().await.is_err());
        assert_eq!(view.error_for("slug"), Some("Slug 'about' is already in use"));
        assert_eq!(store.get::<CmsPage>().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_preserves_identity() {
        let store = EntityStore::in_memory();
        let original = CmsPage::new("About", "about", "<p>a</p>");
        store
            .put(&[original.clone(), CmsPage::new("Terms", "terms", "<p>t</p>")])
            .unwrap();

        let mut view = FormView::<PageForm>::edit(AdminContext::new(store.clone()), &original.id)
            .unwrap();
        assert!(view.is_edit());
        assert!(view.slug().unwrap().user_overridden);
        assert_eq!(view.value("title"), "About");

        view.set("title", "About Us").unwrap();
        // Loaded slug is kept, and it may stay the same as before
        assert_eq!(view.value("slug"), "about");
        view.set("status", "inactive").unwrap();
        view.submit().await.unwrap();

        let pages = store.get::<CmsPage>();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].id, original.id);
        assert_eq!(pages[0].created_at, original.created_at);
        assert_eq!(pages[0].title, "About Us");
        assert_eq!(pages[0].status, Status::Inactive);
        assert!(pages[0].updated_at.is_some());
    }

    #[test]
    fn test_edit_missing_record() {
        let err = FormView::<PageForm>::edit(
            AdminContext::in_memory(),
            &guardpost_core::RecordId::new("gone"),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_field() {
        let mut view = FormView::<PageForm>::add(AdminContext::in_memory());
        assert!(matches!(
            view.set("placement", "home"),
            Err(AdminError::UnknownField { .. })
        ));
    }
}
