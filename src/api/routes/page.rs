//! Page Routes
//!
//! HTML served to the browser.
//!
//! - GET / - Dashboard shell, one spinner per widget
//! - GET /widgets/:id - Resolved chart fragment for one widget

use axum::extract::{Path, State};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{DashboardPage, WidgetFragment};

/// GET /
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> DashboardPage {
    state.dashboard.render_shell()
}

/// GET /widgets/:id
///
/// One activation, one backend request, one fragment.
pub async fn widget_fragment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<WidgetFragment> {
    state
        .dashboard
        .render_widget(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Widget '{}' not found", id)))
}
