//! # Guardpost Views
//!
//! Headless view-models for Guardpost Admin.
//!
//! Each view holds its own state and talks to the [`EntityStore`] it was
//! given through an [`AdminContext`]. A host (the CLI, or any renderer)
//! reads view output, forwards user input, and applies the [`Navigation`]
//! values that actions return to an [`AppState`].
//!
//! ## Views
//!
//! - [`ListView`] - search, filter, sort and paginate a collection
//! - [`FormView`] - add/edit a record, with per-field errors and slug derivation
//! - [`SettingsView`] - edit the single support settings object
//! - [`Dashboard`] - per-collection counts
//!
//! [`EntityStore`]: guardpost_store::EntityStore

// ============================================================================
// Modules
// ============================================================================

pub mod dashboard;
pub mod form;
pub mod forms;
pub mod list;
pub mod list_view;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export internal crates for convenience
pub use guardpost_core;
pub use guardpost_model;
pub use guardpost_store;

pub use dashboard::{CollectionSummary, Dashboard};
pub use form::{
    DerivedField, Draft, FieldKind, FieldSpec, FormMode, FormSchema, FormState, FormView,
    STATUS_OPTIONS, SlugBinding,
};
pub use forms::{
    BannerForm, BannerFormView, CATEGORY_OPTIONS, PLACEMENT_OPTIONS, PageForm, PageFormView,
    ServiceForm, ServiceFormView, SettingsForm, SettingsView, TemplateForm, TemplateFormView,
};
pub use list::{ListPage, ListQuery, PageWindow, locale_compare};
pub use list_view::ListView;
pub use state::{
    AdminContext, AppState, DEFAULT_PAGE_SIZE, Navigation, Notification, Route, StatusLevel,
};

// ============================================================================
// Constants
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Guardpost Admin";

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use guardpost_model::CmsPage;

    #[tokio::test]
    async fn test_add_then_list_flow() {
        let ctx = AdminContext::in_memory().with_page_size(5);
        let mut app = AppState::new();

        app.navigate(Route::Add(guardpost_core::CollectionKey::Pages));
        let mut form = PageFormView::add(ctx.clone());
        form.set("title", "Careers").unwrap();
        form.set("content", "<p>We are hiring</p>").unwrap();
        app.apply(form.submit().await.unwrap());

        assert_eq!(app.route(), &Route::List(guardpost_core::CollectionKey::Pages));
        assert_eq!(app.take_notifications()[0].level, StatusLevel::Success);

        let list = ListView::<CmsPage>::new(ctx);
        let page = list.page();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].slug, "careers");
    }

    #[test]
    fn test_edit_missing_redirects() {
        let ctx = AdminContext::in_memory();
        let mut app = AppState::new();
        let id = guardpost_core::RecordId::new("missing");
        app.navigate(Route::Edit(guardpost_core::CollectionKey::Services, id.clone()));

        if let Err(e) = ServiceFormView::edit(ctx, &id) {
            app.handle_error(&e);
        }
        assert_eq!(
            app.route(),
            &Route::List(guardpost_core::CollectionKey::Services)
        );
        assert_eq!(app.notifications()[0].level, StatusLevel::Error);
    }
}
