//! Pie (donut) chart
//!
//! Slices are laid out counter-clockwise from 3 o'clock, with a fixed gap
//! between non-empty slices. The total sits in the hole.

use askama::Template;

use super::format::format_thousands;
use super::SERIES_COLORS;
use crate::pipeline::{total, ChartPoint};

/// Pie geometry
#[derive(Debug, Clone, Copy)]
pub struct PieConfig {
    /// Width and height of the SVG viewport
    pub size: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Gap between adjacent non-empty slices, in degrees
    pub padding_angle: f64,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            size: 256.0,
            inner_radius: 60.0,
            outer_radius: 100.0,
            padding_angle: 2.0,
        }
    }
}

/// One laid-out slice (angles in degrees)
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Slices plus the total shown in the center
#[derive(Debug, Clone)]
pub struct PieLayout {
    pub slices: Vec<PieSlice>,
    pub total: u64,
}

impl PieLayout {
    pub fn compute(points: &[ChartPoint], config: &PieConfig) -> Self {
        let total = total(points);
        let non_empty = points.iter().filter(|p| p.value > 0).count();
        let padding = if non_empty > 1 { config.padding_angle } else { 0.0 };
        let available = 360.0 - padding * non_empty as f64;

        let mut cursor = 0.0;
        let slices = points
            .iter()
            .enumerate()
            .map(|(idx, point)| {
                let sweep = if total > 0 {
                    point.value as f64 / total as f64 * available
                } else {
                    0.0
                };
                let slice = PieSlice {
                    label: point.label.clone(),
                    value: point.value,
                    color: point
                        .color_hint
                        .clone()
                        .unwrap_or_else(|| SERIES_COLORS[idx % SERIES_COLORS.len()].to_string()),
                    start_angle: cursor,
                    end_angle: cursor + sweep,
                };
                if point.value > 0 {
                    cursor += sweep + padding;
                }
                slice
            })
            .collect();

        Self { slices, total }
    }
}

fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (cx + radius * rad.cos(), cy - radius * rad.sin())
}

/// Full donut ring, drawn as two half-arcs per circle
fn ring_path(cx: f64, cy: f64, inner: f64, outer: f64) -> String {
    format!(
        "M {:.2},{cy:.2} A {outer} {outer} 0 1 0 {:.2},{cy:.2} A {outer} {outer} 0 1 0 {:.2},{cy:.2} \
         M {:.2},{cy:.2} A {inner} {inner} 0 1 1 {:.2},{cy:.2} A {inner} {inner} 0 1 1 {:.2},{cy:.2} Z",
        cx + outer,
        cx - outer,
        cx + outer,
        cx + inner,
        cx - inner,
        cx + inner,
    )
}

fn sector_path(cx: f64, cy: f64, inner: f64, outer: f64, start: f64, end: f64) -> String {
    if end - start >= 359.999 {
        return ring_path(cx, cy, inner, outer);
    }

    let large_arc = if end - start > 180.0 { 1 } else { 0 };
    let (x0, y0) = polar(cx, cy, outer, start);
    let (x1, y1) = polar(cx, cy, outer, end);
    let (x2, y2) = polar(cx, cy, inner, end);
    let (x3, y3) = polar(cx, cy, inner, start);

    format!(
        "M {x0:.2},{y0:.2} A {outer} {outer} 0 {large_arc} 0 {x1:.2},{y1:.2} \
         L {x2:.2},{y2:.2} A {inner} {inner} 0 {large_arc} 1 {x3:.2},{y3:.2} Z"
    )
}

/// One drawn slice
pub struct Sector {
    pub path: String,
    pub color: String,
    pub label: String,
    pub value: String,
}

pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

/// Donut chart with its centered total and a two-column legend
#[derive(Template)]
#[template(path = "chart/pie.html")]
pub struct PieChart {
    pub size: f64,
    pub cx: f64,
    pub total_y: f64,
    pub caption_y: f64,
    pub total: String,
    /// Grey ring drawn when there is nothing to split
    pub empty_ring: Option<String>,
    pub sectors: Vec<Sector>,
    pub legend: Vec<LegendEntry>,
}

impl PieChart {
    pub fn new(points: &[ChartPoint], config: &PieConfig) -> Self {
        let layout = PieLayout::compute(points, config);
        let cx = config.size / 2.0;
        let cy = config.size / 2.0;

        let sectors = layout
            .slices
            .iter()
            .filter(|s| s.sweep() > 0.0)
            .map(|slice| Sector {
                path: sector_path(
                    cx,
                    cy,
                    config.inner_radius,
                    config.outer_radius,
                    slice.start_angle,
                    slice.end_angle,
                ),
                color: slice.color.clone(),
                label: slice.label.clone(),
                value: format_thousands(slice.value),
            })
            .collect();

        let legend = layout
            .slices
            .iter()
            .map(|slice| LegendEntry {
                color: slice.color.clone(),
                label: slice.label.clone(),
            })
            .collect();

        Self {
            size: config.size,
            cx,
            total_y: cy - 10.0,
            caption_y: cy + 15.0,
            total: format_thousands(layout.total),
            empty_ring: (layout.total == 0)
                .then(|| ring_path(cx, cy, config.inner_radius, config.outer_radius)),
            sectors,
            legend,
        }
    }
}
