//! Application state shared across handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;

use crate::config::AdminConfig;
use crate::dashboard::DashboardController;
use crate::middleware::session::SESSION_EXPIRY_SECONDS;
use crate::store_api::{StoreApiClient, TransportError};

/// Dashboard controller backed by the live store backend.
pub type StoreDashboard = DashboardController<StoreApiClient>;

/// Upper bound on concurrently tracked dashboards.
const MAX_DASHBOARDS: u64 = 10_000;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store_api: StoreApiClient,
    /// One controller per signed-in browser, keyed by viewer id.
    dashboards: Cache<u64, StoreDashboard>,
    next_viewer: AtomicU64,
}

impl AppState {
    /// Build the state: one backend client, shared by auth and every dashboard.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Http` if the HTTP client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, TransportError> {
        let store_api = StoreApiClient::new(&config.store_api)?;

        // Idle dashboards expire together with their session.
        let dashboards = Cache::builder()
            .max_capacity(MAX_DASHBOARDS)
            .time_to_idle(Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs()))
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store_api,
                dashboards,
                next_viewer: AtomicU64::new(0),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Backend client for the auth calls.
    #[must_use]
    pub fn store_api(&self) -> &StoreApiClient {
        &self.inner.store_api
    }

    /// Allocate an id for a newly signed-in browser.
    #[must_use]
    pub fn new_viewer_id(&self) -> u64 {
        self.inner.next_viewer.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The dashboard of one viewer, created empty on first use.
    pub async fn dashboard(&self, viewer_id: u64) -> StoreDashboard {
        self.inner
            .dashboards
            .get_with(viewer_id, async {
                tracing::debug!(viewer_id, "Creating dashboard");
                DashboardController::new(self.inner.store_api.clone(), self.inner.config.dashboard)
            })
            .await
    }

    /// Drop a viewer's dashboard (logout).
    pub async fn forget_dashboard(&self, viewer_id: u64) {
        self.inner.dashboards.invalidate(&viewer_id).await;
    }
}
