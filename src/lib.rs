//! # Booking Dashboard
//!
//! Read-only booking statistics dashboard. Three widgets each fetch one
//! aggregate from the stats backend, normalize it into chart points and
//! render a pie or area chart. When the backend is unreachable or answers
//! with anything other than `{"success": true, "data": [...]}`, a widget
//! shows its fixed sample data instead.
//!
//! ## Modules
//!
//! - [`pipeline`]: Fetch, validate, normalize, fall back
//! - [`widget`]: Widget catalog and activation lifecycle
//! - [`chart`]: SVG pie and area charts (askama templates)
//! - [`dashboard`]: Page composition
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML config with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use booking_dashboard::pipeline::HttpFetcher;
//! use booking_dashboard::widget::Catalog;
//! use booking_dashboard::Dashboard;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let fetcher = Arc::new(HttpFetcher::new("http://localhost:5000"));
//!     let dashboard = Dashboard::new(fetcher, Catalog::default());
//!
//!     for (spec, state) in dashboard.resolve_all().await {
//!         println!("{}: {:?}", spec.title, state.origin());
//!     }
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod pipeline;
pub mod widget;

// Re-export top-level types for convenience
pub use pipeline::{
    fetch_and_normalize, normalize, BookingRecord, ChartKind, ChartPoint, DataSourceConfig,
    FieldMap, HttpFetcher, Origin, PipelineError, PipelineResult, Resolution, StatsFetcher,
};

pub use widget::{Catalog, WidgetHandle, WidgetSpec, WidgetState};

pub use dashboard::Dashboard;

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, UpstreamConfig};
