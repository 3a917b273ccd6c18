//! # List View
//!
//! Generic list controller for any [`Record`] collection.
//!
//! The view owns a snapshot of the collection and a [`ListQuery`]. Changing
//! the search term, a filter, the sort or the page size recomputes the
//! filtered+sorted order; changing only the page re-slices the cached order.

use guardpost_core::{AdminError, AdminResult, RecordId, SortDirection, SortField, Titled};
use guardpost_model::Record;
use guardpost_store::Repository;
use tracing::debug;

use crate::list::{ListPage, ListQuery, PageWindow, run_query};
use crate::state::{AdminContext, Navigation, Notification, Route};

/// Search, filter, sort and paginate one collection
#[derive(Debug, Clone)]
pub struct ListView<R: Record> {
    ctx: AdminContext,
    repo: Repository<R>,
    records: Vec<R>,
    query: ListQuery,
    /// Filtered+sorted indices into `records`
    order: Vec<usize>,
    window: PageWindow,
}

impl<R: Record> ListView<R> {
    /// Create the view and read the collection
    pub fn new(ctx: AdminContext) -> Self {
        let repo = ctx.store.collection::<R>();
        let query = ListQuery::new(ctx.page_size);
        let mut view = Self {
            ctx,
            repo,
            records: Vec::new(),
            query,
            order: Vec::new(),
            window: PageWindow::compute(0, 1, 1),
        };
        view.reload();
        view
    }

    /// Re-read the full collection from the store
    pub fn reload(&mut self) {
        self.records = self.repo.all();
        debug!("{} list loaded {} record(s)", R::KEY.display_name(), self.records.len());
        self.recompute();
    }

    fn recompute(&mut self) {
        let (order, window) = run_query(&self.records, &self.query);
        self.order = order;
        self.window = window;
        self.query.page = window.page;
    }

    // ------------------------------------------------------------------------
    // Query inputs
    // ------------------------------------------------------------------------

    /// The current query
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Set the search term and go back to the first page
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.query.page = 1;
        self.recompute();
    }

    /// Set or clear (`None` or empty) an equality filter
    pub fn set_filter(&mut self, field: &str, value: Option<&str>) -> AdminResult<()> {
        if !R::FILTER_FIELDS.contains(&field) {
            return Err(AdminError::unknown_field(R::KEY.slug(), field));
        }
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.query.filters.insert(field.to_string(), v.to_string()),
            None => self.query.filters.remove(field),
        };
        self.query.page = 1;
        self.recompute();
        Ok(())
    }

    /// Drop the search term and every filter
    pub fn clear_filters(&mut self) {
        self.query.search.clear();
        self.query.filters.clear();
        self.query.page = 1;
        self.recompute();
    }

    /// Sort explicitly
    pub fn sort_by(&mut self, field: SortField, direction: SortDirection) {
        self.query.sort_field = field;
        self.query.sort_direction = direction;
        self.recompute();
    }

    /// Column-header style sort: the current field flips, a new one ascends
    pub fn toggle_sort(&mut self, field: SortField) {
        let direction = if self.query.sort_field == field {
            self.query.sort_direction.toggled()
        } else {
            SortDirection::Ascending
        };
        self.sort_by(field, direction);
    }

    /// Change the page size and go back to the first page
    pub fn set_page_size(&mut self, page_size: usize) -> AdminResult<()> {
        if page_size == 0 {
            return Err(AdminError::validation("Page size must be at least 1"));
        }
        self.query.page_size = page_size;
        self.query.page = 1;
        self.recompute();
        Ok(())
    }

    /// Go to a page (clamped to the valid range)
    pub fn go_to_page(&mut self, page: usize) {
        self.window = PageWindow::compute(self.order.len(), self.query.page_size, page);
        self.query.page = self.window.page;
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.window.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.window.page.saturating_sub(1));
    }

    // ------------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------------

    /// The current window
    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// "Showing X to Y of Z results"
    pub fn summary(&self) -> String {
        self.window.summary()
    }

    /// Rows of the current page
    pub fn page(&self) -> ListPage<'_, R> {
        ListPage {
            rows: self.order[self.window.range()]
                .iter()
                .map(|&i| &self.records[i])
                .collect(),
            window: self.window,
            collection_size: self.records.len(),
        }
    }

    /// Every record that passes the search and filters, in sorted order
    pub fn filtered(&self) -> impl Iterator<Item = &R> {
        self.order.iter().map(|&i| &self.records[i])
    }

    /// The unfiltered snapshot
    pub fn records(&self) -> &[R] {
        &self.records
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    /// Delete a record, write the collection and re-read it
    pub async fn delete(&mut self, id: &RecordId) -> AdminResult<Navigation> {
        self.ctx.simulate_latency().await;
        let removed = self.repo.remove(id);
        // Re-read whether or not the write succeeded
        self.reload();
        let removed = removed?;

        Ok(Navigation::to(Route::List(R::KEY)).with_notification(Notification::success(
            format!("{} '{}' deleted", R::KEY.singular_name(), removed.title()),
        )))
    }

    /// Route of the add form
    pub fn add_route(&self) -> Route {
        Route::Add(R::KEY)
    }

    /// Route of the edit form for a record
    pub fn edit_route(&self, id: &RecordId) -> Route {
        Route::Edit(R::KEY, id.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use guardpost_core::Status;
    use guardpost_model::{Banner, BannerPlacement, CmsPage, Service};
    use guardpost_store::EntityStore;

    fn seeded_pages(n: usize) -> (AdminContext, Vec<CmsPage>) {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let pages: Vec<CmsPage> = (1..=n)
            .map(|i| {
                CmsPage::new(format!("Page {:02}", i), format!("page-{}", i), "<p>x</p>")
                    .with_status(if i % 3 == 0 { Status::Inactive } else { Status::Active })
                    .created(base + Duration::hours(i as i64))
            })
            .collect();
        let store = EntityStore::in_memory();
        store.put(&pages).unwrap();
        (AdminContext::new(store).with_page_size(5), pages)
    }

    #[test]
    fn test_twelve_records_page_size_five() {
        let (ctx, _) = seeded_pages(12);
        let mut view = ListView::<CmsPage>::new(ctx);

        assert_eq!(view.page().rows.len(), 5);
        view.next_page();
        assert_eq!(view.page().rows.len(), 5);
        view.next_page();
        assert_eq!(view.page().rows.len(), 2);
        assert_eq!(view.summary(), "Showing 11 to 12 of 12 results");

        view.next_page();
        assert_eq!(view.window().page, 3);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let (ctx, pages) = seeded_pages(3);
        let view = ListView::<CmsPage>::new(ctx);
        let first = view.page().rows[0].id.clone();
        assert_eq!(first, pages[2].id);
    }

    #[test]
    fn test_search_resets_page() {
        let (ctx, _) = seeded_pages(12);
        let mut view = ListView::<CmsPage>::new(ctx);
        view.go_to_page(3);
        assert_eq!(view.query().page, 3);

        view.set_search("page 1");
        assert_eq!(view.query().page, 1);
        // Page 10, 11, 12
        assert_eq!(view.window().total, 3);
    }

    #[test]
    fn test_status_filter() {
        let (ctx, _) = seeded_pages(12);
        let mut view = ListView::<CmsPage>::new(ctx);
        view.set_filter("status", Some("inactive")).unwrap();
        assert_eq!(view.window().total, 4);
        assert!(view.filtered().all(|p| p.status == Status::Inactive));

        view.set_filter("status", None).unwrap();
        assert_eq!(view.window().total, 12);
    }

    #[test]
    fn test_unknown_filter_rejected() {
        let (ctx, _) = seeded_pages(2);
        let mut view = ListView::<CmsPage>::new(ctx);
        let err = view.set_filter("placement", Some("home")).unwrap_err();
        assert!(matches!(err, AdminError::UnknownField { .. }));
    }

    #[test]
    fn test_banner_placement_filter() {
        let store = EntityStore::in_memory();
        let mut about = Banner::new("About hero", "about.jpg");
        about.placement = BannerPlacement::About;
        store
            .put(&[Banner::new("Home hero", "home.jpg"), about.clone()])
            .unwrap();

        let mut view = ListView::<Banner>::new(AdminContext::new(store));
        view.set_filter("placement", Some("about")).unwrap();
        let rows = view.page().rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, about.id);
    }

    #[test]
    fn test_toggle_sort() {
        let (ctx, _) = seeded_pages(4);
        let mut view = ListView::<CmsPage>::new(ctx);

        view.toggle_sort(SortField::Title);
        assert_eq!(view.query().sort_direction, SortDirection::Ascending);
        assert_eq!(view.page().rows[0].title, "Page 01");

        view.toggle_sort(SortField::Title);
        assert_eq!(view.query().sort_direction, SortDirection::Descending);
        assert_eq!(view.page().rows[0].title, "Page 04");
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let (ctx, _) = seeded_pages(12);
        let mut view = ListView::<CmsPage>::new(ctx);
        view.go_to_page(2);
        view.set_page_size(4).unwrap();
        assert_eq!(view.query().page, 1);
        assert_eq!(view.window().total_pages, 3);
        assert!(view.set_page_size(0).is_err());
    }

    #[test]
    fn test_empty_collection() {
        let view = ListView::<Service>::new(AdminContext::in_memory());
        let page = view.page();
        assert!(page.is_empty());
        assert_eq!(view.summary(), "Showing 0 to 0 of 0 results");
        assert_eq!(
            page.empty_message(),
            "Nothing here yet. Add the first one to get started."
        );
    }

    #[test]
    fn test_no_results_message() {
        let (ctx, _) = seeded_pages(3);
        let mut view = ListView::<CmsPage>::new(ctx);
        view.set_search("zzz");
        assert_eq!(
            view.page().empty_message(),
            "No results match your search or filters."
        );
    }

    #[tokio::test]
    async fn test_delete_one_of_three() {
        let (ctx, pages) = seeded_pages(3);
        let store = ctx.store.clone();
        let mut view = ListView::<CmsPage>::new(ctx);

        let nav = view.delete(&pages[1].id).await.unwrap();
        assert_eq!(nav.route, Route::List(guardpost_core::CollectionKey::Pages));
        assert!(nav.notification.is_some());

        assert_eq!(view.records().len(), 2);
        assert!(view.records().iter().all(|p| p.id != pages[1].id));

        let refetched = store.get::<CmsPage>();
        assert_eq!(refetched.len(), 2);
        assert!(refetched.iter().all(|p| p.id != pages[1].id));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (ctx, _) = seeded_pages(2);
        let mut view = ListView::<CmsPage>::new(ctx);
        let err = view.delete(&RecordId::new("missing")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(view.records().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_clamps_page() {
        let (ctx, pages) = seeded_pages(6);
        let mut view = ListView::<CmsPage>::new(ctx);
        view.go_to_page(2);
        assert_eq!(view.page().rows.len(), 1);

        let last = view.page().rows[0].id.clone();
        assert_eq!(last, pages[0].id);
        view.delete(&last).await.unwrap();
        assert_eq!(view.window().page, 1);
        assert_eq!(view.page().rows.len(), 5);
    }

    #[test]
    fn test_routes() {
        let view = ListView::<Service>::new(AdminContext::in_memory());
        assert_eq!(view.add_route().path(), "/services/add");
        assert_eq!(view.edit_route(&RecordId::new("7")).path(), "/services/edit/7");
    }
}
