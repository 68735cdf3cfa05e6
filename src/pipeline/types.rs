//! Core pipeline types
//!
//! Defines the fundamental types flowing through the dashboard:
//! - `ChartPoint`: A normalized `{label, value}` unit consumed by the renderer
//! - `DataSourceConfig`: Everything one widget needs to fetch its data
//! - `Resolution`: The points a widget settled on, and where they came from

use serde::{Deserialize, Serialize};

/// A single normalized chart point
///
/// `value` is unsigned, so the non-negative invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Display label ("WINDOWS", "Aug 1", ...)
    pub label: String,
    /// Booking count
    pub value: u64,
    /// Fixed slice/legend color, when the chart uses one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hint: Option<String>,
}

impl ChartPoint {
    /// Create a point without a color
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
            color_hint: None,
        }
    }

    /// Builder: attach a color
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color_hint = Some(color.into());
        self
    }
}

/// Sum of all point values, as shown in the center of a pie chart
///
/// Saturates at `u64::MAX`; counts parsed from huge strings already sit there.
pub fn total(points: &[ChartPoint]) -> u64 {
    points.iter().fold(0u64, |acc, p| acc.saturating_add(p.value))
}

/// The kind of chart a widget draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Area,
}

/// Which record fields carry the label and the value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    pub label_field: String,
    pub value_field: String,
}

impl FieldMap {
    pub fn new(label_field: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self {
            label_field: label_field.into(),
            value_field: value_field.into(),
        }
    }
}

/// Configuration of one data source
///
/// Each dashboard widget is just one of these values; the fetch, normalize
/// and fallback logic is shared.
#[derive(Debug, Clone, Serialize)]
pub struct DataSourceConfig {
    /// Path on the stats backend, e.g. `/api/daily_stats`
    pub endpoint: String,
    /// Returned verbatim whenever live data is unavailable
    pub fallback_data: Vec<ChartPoint>,
    pub field_map: FieldMap,
    /// Treat the label field as a date: format it for display and sort on
    /// the raw date
    pub sort_by_raw_date: bool,
    pub kind: ChartKind,
    /// Colors assigned to live points by position (pie charts)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub palette: Vec<String>,
}

impl DataSourceConfig {
    /// Create a source with no fallback data and no palette
    pub fn new(endpoint: impl Into<String>, field_map: FieldMap, kind: ChartKind) -> Self {
        Self {
            endpoint: endpoint.into(),
            fallback_data: Vec::new(),
            field_map,
            sort_by_raw_date: false,
            kind,
            palette: Vec::new(),
        }
    }

    /// Builder: set fallback points
    pub fn fallback(mut self, points: Vec<ChartPoint>) -> Self {
        self.fallback_data = points;
        self
    }

    /// Builder: sort on the raw date of the label field
    pub fn sort_by_raw_date(mut self) -> Self {
        self.sort_by_raw_date = true;
        self
    }

    /// Builder: set the color palette
    pub fn palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }
}

/// Where a widget's points came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Live,
    Fallback,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub origin: Origin,
    pub points: Vec<ChartPoint>,
}

impl Resolution {
    pub fn live(points: Vec<ChartPoint>) -> Self {
        Self {
            origin: Origin::Live,
            points,
        }
    }

    pub fn fallback(points: Vec<ChartPoint>) -> Self {
        Self {
            origin: Origin::Fallback,
            points,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Fallback
    }
}
