//! Dashboard summary of every managed collection

use chrono::{DateTime, Utc};
use guardpost_core::{CollectionKey, Published};
use guardpost_model::{Banner, CmsPage, EmailTemplate, Record, Service};
use guardpost_store::EntityStore;

use crate::state::{AdminContext, Route};

/// Record counts for one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSummary {
    pub key: CollectionKey,
    pub total: usize,
    pub active: usize,
}

impl CollectionSummary {
    fn of<R: Record>(store: &EntityStore) -> Self {
        let records = store.get::<R>();
        Self {
            key: R::KEY,
            total: records.len(),
            active: records.iter().filter(|r| r.is_active()).count(),
        }
    }

    pub fn inactive(&self) -> usize {
        self.total - self.active
    }

    /// Where the dashboard card links to
    pub fn route(&self) -> Route {
        Route::List(self.key)
    }
}

/// Snapshot shown on the landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub collections: Vec<CollectionSummary>,
    /// Banners active and inside their date window
    pub live_banners: usize,
    pub settings_configured: bool,
}

impl Dashboard {
    /// Read every collection at `now`
    pub fn load(ctx: &AdminContext, now: DateTime<Utc>) -> Self {
        let store = &ctx.store;
        let collections = vec![
            CollectionSummary::of::<Banner>(store),
            CollectionSummary::of::<CmsPage>(store),
            CollectionSummary::of::<EmailTemplate>(store),
            CollectionSummary::of::<Service>(store),
        ];
        let live_banners = store
            .get::<Banner>()
            .iter()
            .filter(|b| b.is_live(now))
            .count();

        Self {
            collections,
            live_banners,
            settings_configured: !store.settings().load().is_unconfigured(),
        }
    }

    /// Counts for one collection
    pub fn summary(&self, key: CollectionKey) -> Option<&CollectionSummary> {
        self.collections.iter().find(|c| c.key == key)
    }

    /// Total records across collections
    pub fn total_records(&self) -> usize {
        self.collections.iter().map(|c| c.total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use guardpost_core::Status;
    use guardpost_model::SupportSettings;

    #[test]
    fn test_empty_dashboard() {
        let dashboard = Dashboard::load(&AdminContext::in_memory(), Utc::now());
        assert_eq!(dashboard.collections.len(), 4);
        assert_eq!(dashboard.total_records(), 0);
        assert!(!dashboard.settings_configured);
    }

    #[test]
    fn test_dashboard_counts() {
        let ctx = AdminContext::in_memory();
        let now = Utc::now();
        let mut expired = Banner::new("Old promo", "old.jpg");
        expired.end_date = Some(now - Duration::days(1));
        let mut hidden = Banner::new("Hidden", "h.jpg");
        hidden.status = Status::Inactive;
        ctx.store
            .put(&[Banner::new("Live", "live.jpg"), expired, hidden])
            .unwrap();
        ctx.store
            .put(&[Service::new("Patrol", "Patrol"), Service::new("CCTV", "CCTV")])
            .unwrap();
        ctx.store
            .settings()
            .save(&SupportSettings {
                support_email: "help@guardpost.example".to_string(),
                support_phone: "0800".to_string(),
                ..Default::default()
            })
            .unwrap();

        let dashboard = Dashboard::load(&ctx, now);
        let banners = dashboard.summary(CollectionKey::Banners).unwrap();
        assert_eq!((banners.total, banners.active, banners.inactive()), (3, 2, 1));
        assert_eq!(dashboard.live_banners, 1);
        assert_eq!(dashboard.summary(CollectionKey::Services).unwrap().total, 2);
        assert_eq!(dashboard.total_records(), 5);
        assert!(dashboard.settings_configured);
        assert_eq!(banners.route().path(), "/banners");
    }
}
