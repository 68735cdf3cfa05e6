//! Dashboard Widgets
//!
//! - **catalog**: which widgets exist and where their data comes from
//! - **state**: `Loading | Ready | Fallback`
//! - **handle**: activation as an abortable background task

mod catalog;
mod handle;
mod state;

pub use catalog::{bookings_by_browser, bookings_by_os, daily_bookings_trend, Catalog, Span, WidgetSpec};
pub use handle::WidgetHandle;
pub use state::WidgetState;
