//! Chart Rendering
//!
//! Server-side SVG for the two chart kinds the dashboard uses:
//! - **Pie**: donut with the total in the middle and a legend
//! - **Area**: filled trend line with `k`-formatted y ticks
//!
//! Markup comes from the askama templates under `templates/chart/`; the
//! structs here only carry laid-out geometry and preformatted labels.

mod area;
mod format;
mod pie;

pub use area::{nice_ticks, AreaChart, AreaConfig, AreaLayout};
pub use format::{format_k_tick, format_thousands};
pub use pie::{PieChart, PieConfig, PieLayout, PieSlice};

use askama::Template;
use std::fmt;

use crate::pipeline::{ChartKind, ChartPoint};

/// Slice colors for points that arrive without one
pub const SERIES_COLORS: [&str; 6] = [
    "#FF9800", // Orange (primary)
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
];

/// A laid-out chart of either kind, ready to render
pub enum Chart {
    Pie(PieChart),
    Area(AreaChart),
}

impl Chart {
    /// Lay out points as the given chart kind with default geometry
    pub fn new(points: &[ChartPoint], kind: ChartKind) -> Self {
        match kind {
            ChartKind::Pie => Chart::Pie(PieChart::new(points, &PieConfig::default())),
            ChartKind::Area => Chart::Area(AreaChart::new(points, &AreaConfig::default())),
        }
    }
}

// Lets a chart sit inside another template as `{{ chart|safe }}`
impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chart::Pie(chart) => chart.render_into(f),
            Chart::Area(chart) => chart.render_into(f),
        }
        .map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dispatch() {
        let points = vec![ChartPoint::new("A", 3200), ChartPoint::new("B", 4243)];

        let pie = Chart::new(&points, ChartKind::Pie).to_string();
        assert!(pie.contains("chart-pie"));
        assert!(pie.contains(">7,443</text>"));

        let area = Chart::new(&points, ChartKind::Area).to_string();
        assert!(area.contains("chart-area"));
        assert!(!area.contains("Total Bookings"));
    }
}
