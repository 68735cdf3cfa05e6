//! Widget Catalog
//!
//! The three dashboard widgets, each a plain `DataSourceConfig` plus some
//! presentation metadata. Adding a widget means adding an entry here.

use serde::Serialize;

use crate::pipeline::{ChartKind, ChartPoint, DataSourceConfig, FieldMap};

/// How much of a dashboard row a widget takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Span {
    Half,
    Full,
}

/// One widget: identity, presentation and data source
#[derive(Debug, Clone, Serialize)]
pub struct WidgetSpec {
    /// URL-safe identifier ("os", "browser", "daily")
    pub id: String,
    pub title: String,
    /// Accent color for the card icon and spinner
    pub accent: String,
    pub span: Span,
    pub source: DataSourceConfig,
}

impl WidgetSpec {
    pub fn kind(&self) -> ChartKind {
        self.source.kind
    }
}

/// Ordered set of widgets making up the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    widgets: Vec<WidgetSpec>,
}

impl Catalog {
    pub fn new(widgets: Vec<WidgetSpec>) -> Self {
        Self { widgets }
    }

    pub fn get(&self, id: &str) -> Option<&WidgetSpec> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetSpec> {
        self.widgets.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.widgets.iter().map(|w| w.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl Default for Catalog {
    /// Browser and OS side by side, daily trend underneath
    fn default() -> Self {
        Self::new(vec![bookings_by_browser(), bookings_by_os(), daily_bookings_trend()])
    }
}

fn palette_of(points: &[ChartPoint]) -> Vec<String> {
    points.iter().filter_map(|p| p.color_hint.clone()).collect()
}

/// Bookings split by operating system
pub fn bookings_by_os() -> WidgetSpec {
    let fallback = vec![
        ChartPoint::new("WINDOWS", 3200).color("#0078D4"),
        ChartPoint::new("MACOS", 2100).color("#000000"),
        ChartPoint::new("LINUX", 800).color("#FCC624"),
        ChartPoint::new("ANDROID", 900).color("#3DDC84"),
        ChartPoint::new("IOS", 443).color("#007AFF"),
    ];

    WidgetSpec {
        id: "os".to_string(),
        title: "Bookings by OS".to_string(),
        accent: "#16a34a".to_string(),
        span: Span::Half,
        source: DataSourceConfig::new("/api/os_stats", FieldMap::new("name", "value"), ChartKind::Pie)
            .palette(palette_of(&fallback))
            .fallback(fallback),
    }
}

/// Bookings split by browser
pub fn bookings_by_browser() -> WidgetSpec {
    let fallback = vec![
        ChartPoint::new("CHROME", 4100).color("#4285F4"),
        ChartPoint::new("SAFARI", 1900).color("#1B88CA"),
        ChartPoint::new("FIREFOX", 700).color("#FF7139"),
        ChartPoint::new("EDGE", 600).color("#0078D7"),
        ChartPoint::new("OTHER", 143).color("#9CA3AF"),
    ];

    WidgetSpec {
        id: "browser".to_string(),
        title: "Bookings by Browser".to_string(),
        accent: "#9333ea".to_string(),
        span: Span::Half,
        source: DataSourceConfig::new(
            "/api/browser_stats",
            FieldMap::new("name", "value"),
            ChartKind::Pie,
        )
        .palette(palette_of(&fallback))
        .fallback(fallback),
    }
}

/// Daily booking totals over time
pub fn daily_bookings_trend() -> WidgetSpec {
    WidgetSpec {
        id: "daily".to_string(),
        title: "Daily Bookings Trend".to_string(),
        accent: "#3b82f6".to_string(),
        span: Span::Full,
        source: DataSourceConfig::new(
            "/api/daily_stats",
            FieldMap::new("date", "bookings"),
            ChartKind::Area,
        )
        .sort_by_raw_date()
        .fallback(vec![
            ChartPoint::new("Aug 1", 85000),
            ChartPoint::new("Aug 2", 92000),
            ChartPoint::new("Aug 3", 78000),
            ChartPoint::new("Aug 4", 105000),
            ChartPoint::new("Aug 5", 115000),
        ]),
    }
}
