//! Data Transfer Objects
//!
//! Response types for the JSON endpoints.

use serde::Serialize;

use crate::pipeline::{ChartKind, ChartPoint, Origin};
use crate::widget::{Span, WidgetSpec};

// ============================================
// WIDGET DTOs
// ============================================

/// One entry of the widget listing
#[derive(Debug, Serialize)]
pub struct WidgetSummary {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub span: Span,
    /// Stats backend path the widget reads
    pub endpoint: String,
}

impl From<&WidgetSpec> for WidgetSummary {
    fn from(spec: &WidgetSpec) -> Self {
        Self {
            id: spec.id.clone(),
            title: spec.title.clone(),
            kind: spec.kind(),
            span: spec.span,
            endpoint: spec.source.endpoint.clone(),
        }
    }
}

/// Widget listing response
#[derive(Debug, Serialize)]
pub struct WidgetListResponse {
    pub widgets: Vec<WidgetSummary>,
    pub total: usize,
}

/// Resolved data of one widget
#[derive(Debug, Serialize)]
pub struct WidgetDataResponse {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    /// "live" or "fallback"
    pub origin: Origin,
    /// Sum of all point values
    pub total: u64,
    pub points: Vec<ChartPoint>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Booking stats backend base URL
    pub upstream: String,
    /// Number of widgets served
    pub widgets: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
