//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::Dashboard;
use crate::pipeline::HttpFetcher;
use crate::widget::Catalog;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Widget catalog bound to the stats fetcher
    pub dashboard: Dashboard,
    /// Where booking stats come from, for health reporting
    pub upstream_url: Arc<str>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state around an existing dashboard
    pub fn new(dashboard: Dashboard, upstream_url: impl Into<Arc<str>>) -> Self {
        Self {
            dashboard,
            upstream_url: upstream_url.into(),
            start_time: Instant::now(),
        }
    }

    /// Default catalog fetching over HTTP from `upstream_url`
    pub fn with_upstream(upstream_url: &str) -> Self {
        let fetcher = HttpFetcher::new(upstream_url);
        let base = fetcher.base_url().to_string();
        Self::new(Dashboard::new(Arc::new(fetcher), Catalog::default()), base)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
