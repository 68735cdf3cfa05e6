//! Widget State
//!
//! A widget starts `Loading` and settles exactly once. Failures never show
//! up here; they are already folded into `Fallback`.

use serde::Serialize;

use crate::pipeline::{ChartPoint, Origin, Resolution};

/// Observable state of one dashboard widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "points", rename_all = "lowercase")]
pub enum WidgetState {
    Loading,
    Ready(Vec<ChartPoint>),
    Fallback(Vec<ChartPoint>),
}

impl WidgetState {
    pub fn is_loading(&self) -> bool {
        matches!(self, WidgetState::Loading)
    }

    /// Points to draw, once resolved
    pub fn points(&self) -> Option<&[ChartPoint]> {
        match self {
            WidgetState::Loading => None,
            WidgetState::Ready(points) | WidgetState::Fallback(points) => Some(points),
        }
    }

    pub fn origin(&self) -> Option<Origin> {
        match self {
            WidgetState::Loading => None,
            WidgetState::Ready(_) => Some(Origin::Live),
            WidgetState::Fallback(_) => Some(Origin::Fallback),
        }
    }
}

impl From<Resolution> for WidgetState {
    fn from(resolution: Resolution) -> Self {
        match resolution.origin {
            Origin::Live => WidgetState::Ready(resolution.points),
            Origin::Fallback => WidgetState::Fallback(resolution.points),
        }
    }
}
