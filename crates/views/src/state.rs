//! Navigation and notification state for Guardpost Admin
//!
//! Views never navigate by themselves. They return a [`Navigation`] that the
//! host applies to its [`AppState`], which tracks the active route and the
//! queue of pending notifications.

use guardpost_core::{AdminError, CollectionKey, RecordId};
use std::time::Duration;

use guardpost_store::EntityStore;

// ============================================================================
// View Context
// ============================================================================

/// Default number of rows per list page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Dependencies handed to every view
#[derive(Debug, Clone)]
pub struct AdminContext {
    /// Shared entity store
    pub store: EntityStore,
    /// Initial page size of list views
    pub page_size: usize,
    /// Cosmetic delay awaited before each write
    pub simulated_latency: Duration,
}

impl AdminContext {
    /// Create a context with default page size and no simulated latency
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            page_size: DEFAULT_PAGE_SIZE,
            simulated_latency: Duration::ZERO,
        }
    }

    /// Context over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(EntityStore::in_memory())
    }

    /// Set the initial page size of list views
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the simulated write latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    /// Await the simulated latency, if any
    pub(crate) async fn simulate_latency(&self) {
        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Application routes/views
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Landing dashboard
    #[default]
    Dashboard,
    /// List view of a collection
    List(CollectionKey),
    /// Add form for a collection
    Add(CollectionKey),
    /// Edit form for one record
    Edit(CollectionKey, RecordId),
    /// Support settings form
    Settings,
}

impl Route {
    /// Get the display name for this route
    pub fn display_name(&self) -> String {
        match self {
            Route::Dashboard => "Dashboard".to_string(),
            Route::List(key) => key.display_name().to_string(),
            Route::Add(key) => format!("Add {}", key.singular_name()),
            Route::Edit(key, _) => format!("Edit {}", key.singular_name()),
            Route::Settings => "Support Settings".to_string(),
        }
    }

    /// Path-style representation (`/pages/edit/<id>`)
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::List(key) => format!("/{}", key.slug()),
            Route::Add(key) => format!("/{}/add", key.slug()),
            Route::Edit(key, id) => format!("/{}/edit/{}", key.slug(), id),
            Route::Settings => "/settings".to_string(),
        }
    }

    /// The collection a route belongs to, if any
    pub fn collection(&self) -> Option<CollectionKey> {
        match self {
            Route::List(key) | Route::Add(key) | Route::Edit(key, _) => Some(*key),
            Route::Settings => Some(CollectionKey::Settings),
            Route::Dashboard => None,
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Notification severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast-style message for the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub level: StatusLevel,
}

impl Notification {
    pub fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Error)
    }
}

/// Where to go after an action, and what to tell the user
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub route: Route,
    pub notification: Option<Notification>,
}

impl Navigation {
    /// Navigate without a message
    pub fn to(route: Route) -> Self {
        Self {
            route,
            notification: None,
        }
    }

    /// Attach a notification
    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Active route plus pending notifications
#[derive(Debug, Clone, Default)]
pub struct AppState {
    route: Route,
    notifications: Vec<Notification>,
}

impl AppState {
    /// Create new application state on the dashboard
    pub fn new() -> Self {
        Self::default()
    }

    /// The active route
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Navigate to a route
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigating to {}", route.path());
        self.route = route;
    }

    /// Queue a notification
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Apply a navigation returned by a view
    pub fn apply(&mut self, navigation: Navigation) {
        if let Some(notification) = navigation.notification {
            self.notify(notification);
        }
        self.navigate(navigation.route);
    }

    /// Surface an error from a view
    ///
    /// Not-found errors on an edit route redirect to the collection's list.
    pub fn handle_error(&mut self, error: &AdminError) {
        self.notify(Notification::error(error.to_string()));
        if error.is_not_found() {
            if let Route::Edit(key, _) = &self.route {
                let key = *key;
                self.navigate(Route::List(key));
            }
        }
    }

    /// Pending notifications, oldest first
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain pending notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

// ============================================================================
// Tests
// ============================================================================
