//! Widget Routes
//!
//! JSON access to the widget catalog and resolved widget data.
//!
//! - GET /api/v1/widgets - List widgets
//! - GET /api/v1/widgets/:id - Resolve one widget (live or fallback points)

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{WidgetDataResponse, WidgetListResponse, WidgetSummary};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::pipeline::total;

/// GET /api/v1/widgets
pub async fn list_widgets(State(state): State<Arc<AppState>>) -> Json<WidgetListResponse> {
    let widgets: Vec<WidgetSummary> = state
        .dashboard
        .catalog()
        .iter()
        .map(WidgetSummary::from)
        .collect();

    Json(WidgetListResponse {
        total: widgets.len(),
        widgets,
    })
}

/// GET /api/v1/widgets/:id
///
/// Activates the widget and waits for it. Never fails for a known widget:
/// an unreachable backend shows up as `"origin": "fallback"`.
pub async fn get_widget_data(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<WidgetDataResponse>> {
    let not_found = || ApiError::NotFound(format!("Widget '{}' not found", id));

    let spec = state.dashboard.catalog().get(&id).ok_or_else(not_found)?;
    let resolved = state.dashboard.resolve(&id).await.ok_or_else(not_found)?;

    let origin = resolved
        .origin()
        .ok_or_else(|| ApiError::Internal(format!("Widget '{}' did not resolve", id)))?;
    let points = resolved.points().map(<[_]>::to_vec).unwrap_or_default();

    Ok(Json(WidgetDataResponse {
        id: spec.id.clone(),
        title: spec.title.clone(),
        kind: spec.kind(),
        origin,
        total: total(&points),
        points,
    }))
}
