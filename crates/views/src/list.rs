//! List query pipeline: filter, sort, paginate
//!
//! Everything here is a pure function of the records and a [`ListQuery`].
//! The pipeline works on indices into the record slice so the caller can
//! keep the filtered+sorted order and re-slice it when only the page changes.

use guardpost_core::{Published, SortDirection, SortField, Timestamped, Titled};
use guardpost_model::Record;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Range;

// ============================================================================
// ListQuery
// ============================================================================

/// User-controlled inputs of a list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Free-text search against the title
    pub search: String,
    /// Field-equality filters; a field without an entry matches everything
    pub filters: BTreeMap<String, String>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// Rows per page, at least 1
    pub page_size: usize,
    /// Requested page, 1-based
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            sort_field: SortField::CreatedAt,
            sort_direction: SortDirection::Descending,
            page_size: crate::state::DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Default::default()
        }
    }

    /// Whether a search term or any filter narrows the list
    pub fn is_narrowed(&self) -> bool {
        !self.search.trim().is_empty() || !self.filters.is_empty()
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Check one record against the search term and filters
pub fn matches<R: Record>(record: &R, search: &str, filters: &BTreeMap<String, String>) -> bool {
    record.title_contains(search)
        && filters
            .iter()
            .all(|(field, wanted)| record.filter_value(field).as_deref() == Some(wanted.as_str()))
}

/// Indices of the records that pass the search term and filters, in order
pub fn filter_indices<R: Record>(
    records: &[R],
    search: &str,
    filters: &BTreeMap<String, String>,
) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(*r, search, filters))
        .map(|(i, _)| i)
        .collect()
}

// ============================================================================
// Sort
// ============================================================================

/// Case-insensitive string comparison
///
/// Compares case-folded text first so that "apple" sorts next to "Apple",
/// then falls back to the raw strings so the order is total. Ordering is by
/// Unicode code point after case folding; accents are not folded, so
/// "École" sorts after "Zebra".
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Ascending comparison of two records on a sort field
pub fn compare_records<R: Record>(a: &R, b: &R, field: SortField) -> Ordering {
    match field {
        SortField::Title => locale_compare(a.title(), b.title()),
        SortField::CreatedAt => a.created_at().cmp(&b.created_at()),
    }
}

/// Stable sort of `indices` by the records they point at
pub fn sort_indices<R: Record>(
    records: &[R],
    indices: &mut [usize],
    field: SortField,
    direction: SortDirection,
) {
    // `sort_by` is stable: equal keys keep their relative order
    indices.sort_by(|&a, &b| direction.apply(compare_records(&records[a], &records[b], field)));
}

// ============================================================================
// Paginate
// ============================================================================

/// One page of a filtered list, with its "showing X to Y of Z" numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Effective page after clamping, 1-based
    pub page: usize,
    pub page_size: usize,
    /// Number of pages (0 when there are no results)
    pub total_pages: usize,
    /// 1-based position of the first row shown (0 when empty)
    pub start: usize,
    /// 1-based position of the last row shown (0 when empty)
    pub end: usize,
    /// Size of the filtered set
    pub total: usize,
}

impl PageWindow {
    /// Compute the window for `requested_page`, clamped to the valid range
    pub fn compute(total: usize, page_size: usize, requested_page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size);
        let page = requested_page.clamp(1, total_pages.max(1));

        let (start, end) = if total == 0 {
            (0, 0)
        } else {
            ((page - 1) * page_size + 1, (page * page_size).min(total))
        };

        Self {
            page,
            page_size,
            total_pages,
            start,
            end,
            total,
        }
    }

    /// Whether the filtered set is empty
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of rows on this page
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// 0-based slice range into the filtered+sorted sequence
    pub fn range(&self) -> Range<usize> {
        if self.is_empty() {
            0..0
        } else {
            (self.start - 1)..self.end
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Showing X to Y of Z results"
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.start, self.end, self.total
        )
    }
}

/// Run the whole pipeline, returning the filtered+sorted indices and the
/// window for the requested page
pub fn run_query<R: Record>(records: &[R], query: &ListQuery) -> (Vec<usize>, PageWindow) {
    let mut indices = filter_indices(records, &query.search, &query.filters);
    sort_indices(records, &mut indices, query.sort_field, query.sort_direction);
    let window = PageWindow::compute(indices.len(), query.page_size, query.page);
    (indices, window)
}

// ============================================================================
// ListPage
// ============================================================================

/// Rows of the current page, ready to render
#[derive(Debug, Clone)]
pub struct ListPage<'a, R> {
    pub rows: Vec<&'a R>,
    pub window: PageWindow,
    /// Size of the unfiltered collection
    pub collection_size: usize,
}

impl<R: Published> ListPage<'_, R> {
    /// Whether the "no results" state should be shown instead of a table
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Message for the "no results" state
    pub fn empty_message(&self) -> &'static str {
        if self.collection_size == 0 {
            "Nothing here yet. Add the first one to get started."
        } else {
            "No results match your search or filters."
        }
    }

    /// Active rows on this page
    pub fn active_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_active()).count()
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
    use guardpost_model::CmsPage;

    fn page(title: &str, day: i64, status: Status) -> CmsPage {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        CmsPage::new(title, guardpost_model::derive_slug(title), "<p>x</p>")
            .with_status(status)
            .created(base + Duration::days(day))
    }

    fn sample() -> Vec<CmsPage> {
        vec![
            page("Terms of Service", 3, Status::Active),
            page("about us", 1, Status::Active),
            page("Careers", 5, Status::Inactive),
            page("About the Team", 2, Status::Inactive),
            page("Contact", 4, Status::Active),
        ]
    }

    fn titles<'a>(records: &'a [CmsPage], indices: &[usize]) -> Vec<&'a str> {
        indices.iter().map(|&i| records[i].title.as_str()).collect()
    }

    #[test]
    fn test_filter_by_search_case_insensitive() {
        let records = sample();
        let hits = filter_indices(&records, "ABOUT", &BTreeMap::new());
        assert_eq!(titles(&records, &hits), vec!["about us", "About the Team"]);
    }

    #[test]
    fn test_filter_result_is_subset_matching_term() {
        let records = sample();
        for term in ["a", "o", "team", "zzz", " c", " s", "us "] {
            let hits = filter_indices(&records, term, &BTreeMap::new());
            assert!(hits.iter().all(|&i| i < records.len()));
            for &i in &hits {
                let title = records[i].title.to_lowercase();
                assert!(
                    title.contains(&term.to_lowercase()),
                    "{:?} does not contain {:?}",
                    records[i].title,
                    term
                );
            }
        }
    }

    #[test]
    fn test_filter_search_is_not_trimmed() {
        let records = sample();
        let hits = filter_indices(&records, " c", &BTreeMap::new());
        assert!(hits.is_empty());

        let hits = filter_indices(&records, " s", &BTreeMap::new());
        assert_eq!(titles(&records, &hits), vec!["Terms of Service"]);

        let hits = filter_indices(&records, "  ", &BTreeMap::new());
        assert_eq!(hits.len(), records.len());
    }

    #[test]
    fn test_filter_by_status() {
        let records = sample();
        let mut filters = BTreeMap::new();
        filters.insert("status".to_string(), "inactive".to_string());
        let hits = filter_indices(&records, "", &filters);
        assert_eq!(titles(&records, &hits), vec!["Careers", "About the Team"]);

        let hits = filter_indices(&records, "about", &filters);
        assert_eq!(titles(&records, &hits), vec!["About the Team"]);
    }

    #[test]
    fn test_filter_on_unknown_field_matches_nothing() {
        let records = sample();
        let mut filters = BTreeMap::new();
        filters.insert("colour".to_string(), "blue".to_string());
        assert!(filter_indices(&records, "", &filters).is_empty());
    }

    #[test]
    fn test_sort_by_title_locale() {
        let records = sample();
        let mut idx: Vec<usize> = (0..records.len()).collect();
        sort_indices(&records, &mut idx, SortField::Title, SortDirection::Ascending);
        assert_eq!(
            titles(&records, &idx),
            vec!["About the Team", "about us", "Careers", "Contact", "Terms of Service"]
        );

        sort_indices(&records, &mut idx, SortField::Title, SortDirection::Descending);
        assert_eq!(titles(&records, &idx)[0], "Terms of Service");
    }

    #[test]
    fn test_sort_by_created_at() {
        let records = sample();
        let mut idx: Vec<usize> = (0..records.len()).collect();
        sort_indices(&records, &mut idx, SortField::CreatedAt, SortDirection::Ascending);
        assert_eq!(
            titles(&records, &idx),
            vec!["about us", "About the Team", "Terms of Service", "Contact", "Careers"]
        );
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut records = sample();
        // Same created_at for all: order must stay as stored
        let at = records[0].created_at;
        for r in records.iter_mut() {
            r.created_at = at;
        }
        let mut idx: Vec<usize> = (0..records.len()).collect();
        sort_indices(&records, &mut idx, SortField::CreatedAt, SortDirection::Descending);
        assert_eq!(idx, vec![0, 1, 2, 3, 4]);

        let records = sample();
        let mut once: Vec<usize> = (0..records.len()).collect();
        sort_indices(&records, &mut once, SortField::Title, SortDirection::Ascending);
        let mut twice = once.clone();
        sort_indices(&records, &mut twice, SortField::Title, SortDirection::Ascending);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Zebra", "apple"), Ordering::Greater);
        assert_ne!(locale_compare("a", "A"), Ordering::Equal);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        // code point order after folding, accents included
        assert_eq!(locale_compare("École", "Zebra"), Ordering::Greater);
        assert_eq!(locale_compare("école", "Ecole"), Ordering::Greater);
    }

    #[test]
    fn test_page_window_twelve_by_five() {
        let w1 = PageWindow::compute(12, 5, 1);
        assert_eq!((w1.start, w1.end, w1.len()), (1, 5, 5));
        let w2 = PageWindow::compute(12, 5, 2);
        assert_eq!((w2.start, w2.end, w2.len()), (6, 10, 5));
        let w3 = PageWindow::compute(12, 5, 3);
        assert_eq!((w3.start, w3.end, w3.len()), (11, 12, 2));
        assert_eq!(w3.total_pages, 3);
        assert_eq!(w3.summary(), "Showing 11 to 12 of 12 results");
        assert!(!w3.has_next());
        assert!(w3.has_previous());
    }

    #[test]
    fn test_page_window_clamps() {
        let w = PageWindow::compute(12, 5, 9);
        assert_eq!(w.page, 3);
        let w = PageWindow::compute(12, 5, 0);
        assert_eq!(w.page, 1);
    }

    #[test]
    fn test_page_window_empty() {
        let w = PageWindow::compute(0, 10, 4);
        assert_eq!((w.page, w.total_pages, w.start, w.end, w.total), (1, 0, 0, 0, 0));
        assert!(w.is_empty());
        assert_eq!(w.range(), 0..0);
        assert_eq!(w.summary(), "Showing 0 to 0 of 0 results");
    }

    #[test]
    fn test_pages_cover_every_record_once() {
        for total in [0usize, 1, 4, 5, 6, 12, 23] {
            for size in [1usize, 3, 5, 10] {
                let first = PageWindow::compute(total, size, 1);
                let mut seen = Vec::new();
                for p in 1..=first.total_pages {
                    let w = PageWindow::compute(total, size, p);
                    if p < w.total_pages {
                        assert_eq!(w.end - w.start + 1, size);
                    } else {
                        let rem = total % size;
                        assert_eq!(w.len(), if rem == 0 { size } else { rem });
                    }
                    seen.extend(w.range());
                }
                assert_eq!(seen, (0..total).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_run_query() {
        let records = sample();
        let query = ListQuery {
            search: "a".to_string(),
            sort_field: SortField::Title,
            sort_direction: SortDirection::Ascending,
            page_size: 2,
            page: 2,
            ..Default::default()
        };
        let (indices, window) = run_query(&records, &query);
        // "Terms of Service" has no 'a'; the other four match
        assert_eq!(indices.len(), 4);
        assert_eq!(window.range(), 2..4);
        assert_eq!(
            titles(&records, &indices[window.range()]),
            vec!["Careers", "Contact"]
        );
    }
}
