//! Area chart
//!
//! Points are spread evenly along x in the order given (the pipeline has
//! already sorted them by date). Y starts at zero and runs to a "nice"
//! rounded maximum; ticks read in thousands.

use askama::Template;

use super::format::{format_k_tick, format_thousands};
use crate::pipeline::ChartPoint;

/// Candidate step multipliers for y-axis ticks
const NICE_STEPS: [f64; 11] = [1.0, 1.2, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0];

/// Area chart geometry and styling
#[derive(Debug, Clone)]
pub struct AreaConfig {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub stroke: String,
    pub tick_count: usize,
    /// SVG id of the fill gradient; must be unique within a page
    pub gradient_id: String,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 320.0,
            margin_top: 10.0,
            margin_right: 30.0,
            margin_bottom: 30.0,
            margin_left: 60.0,
            stroke: "#3b82f6".to_string(),
            tick_count: 5,
            gradient_id: "colorBookings".to_string(),
        }
    }
}

impl AreaConfig {
    fn plot_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    fn plot_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }

    fn baseline(&self) -> f64 {
        self.height - self.margin_bottom
    }
}

/// Evenly spaced y-axis ticks from zero, the last one at or above `max`
pub fn nice_ticks(max: u64, count: usize) -> Vec<u64> {
    let count = count.max(2);
    let raw = (max.max(1) as f64) / (count - 1) as f64;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let normalized = raw / magnitude;

    let multiplier = NICE_STEPS
        .iter()
        .copied()
        .find(|m| *m + 1e-9 >= normalized)
        .unwrap_or(10.0);

    // Snap float noise (1.2 * 10000 = 11999.999...) before rounding up
    let exact = multiplier * magnitude;
    let step = if (exact - exact.round()).abs() < 1e-6 {
        exact.round()
    } else {
        exact.ceil()
    };
    let step = (step as u64).max(1);

    // Near u64::MAX the top tick pins to the maximum instead of wrapping
    (0..count as u64).map(|i| i.saturating_mul(step)).collect()
}

/// Screen positions for every point and tick
#[derive(Debug, Clone)]
pub struct AreaLayout {
    /// (x, y) per point, in input order
    pub positions: Vec<(f64, f64)>,
    /// (tick value, y)
    pub ticks: Vec<(u64, f64)>,
    pub baseline: f64,
}

impl AreaLayout {
    pub fn compute(points: &[ChartPoint], config: &AreaConfig) -> Self {
        let max = points.iter().map(|p| p.value).max().unwrap_or(0);
        let tick_values = nice_ticks(max, config.tick_count);
        let top = *tick_values.last().unwrap_or(&1) as f64;

        let plot_w = config.plot_width();
        let plot_h = config.plot_height();
        let y_of = |value: u64| config.margin_top + (1.0 - value as f64 / top) * plot_h;

        let positions = points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let x = if points.len() > 1 {
                    config.margin_left + i as f64 * plot_w / (points.len() - 1) as f64
                } else {
                    config.margin_left + plot_w / 2.0
                };
                (x, y_of(point.value))
            })
            .collect();

        let ticks = tick_values.into_iter().map(|v| (v, y_of(v))).collect();

        Self {
            positions,
            ticks,
            baseline: config.baseline(),
        }
    }
}

pub struct Tick {
    pub label: String,
    pub y: f64,
}

/// One data point: a dot with a tooltip and an x-axis label
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub value: String,
}

pub struct Series {
    pub area_path: String,
    pub line_path: String,
    pub dots: Vec<Dot>,
    pub label_y: f64,
}

/// Area chart with grid, `k` ticks, dots and tooltips
#[derive(Template)]
#[template(path = "chart/area.html")]
pub struct AreaChart {
    pub width: f64,
    pub height: f64,
    pub gradient_id: String,
    pub stroke: String,
    pub grid_left: f64,
    pub grid_right: f64,
    pub ticks: Vec<Tick>,
    /// `None` draws the "No data" notice
    pub series: Option<Series>,
}

impl AreaChart {
    pub fn new(points: &[ChartPoint], config: &AreaConfig) -> Self {
        let layout = AreaLayout::compute(points, config);

        let ticks = layout
            .ticks
            .iter()
            .map(|(value, y)| Tick {
                label: format_k_tick(*value),
                y: *y,
            })
            .collect();

        let series = match (layout.positions.first(), layout.positions.last()) {
            (Some((first_x, _)), Some((last_x, _))) => {
                let line = layout
                    .positions
                    .iter()
                    .map(|(x, y)| format!("{x:.2},{y:.2}"))
                    .collect::<Vec<_>>()
                    .join(" L ");

                Some(Series {
                    area_path: format!(
                        "M {first_x:.2},{b:.2} L {line} L {last_x:.2},{b:.2} Z",
                        b = layout.baseline
                    ),
                    line_path: format!("M {line}"),
                    dots: points
                        .iter()
                        .zip(&layout.positions)
                        .map(|(point, (x, y))| Dot {
                            x: *x,
                            y: *y,
                            label: point.label.clone(),
                            value: format_thousands(point.value),
                        })
                        .collect(),
                    label_y: layout.baseline + 20.0,
                })
            }
            _ => None,
        };

        Self {
            width: config.width,
            height: config.height,
            gradient_id: config.gradient_id.clone(),
            stroke: config.stroke.clone(),
            grid_left: config.margin_left,
            grid_right: config.width - config.margin_right,
            ticks,
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_area(points: &[ChartPoint]) -> String {
        AreaChart::new(points, &AreaConfig::default()).render().unwrap()
    }

    fn trend() -> Vec<ChartPoint> {
        vec![
            ChartPoint::new("Aug 1", 85000),
            ChartPoint::new("Aug 2", 92000),
            ChartPoint::new("Aug 3", 78000),
            ChartPoint::new("Aug 4", 105000),
            ChartPoint::new("Aug 5", 115000),
        ]
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(115000, 5), vec![0, 30000, 60000, 90000, 120000]);
        assert_eq!(nice_ticks(92000, 5), vec![0, 25000, 50000, 75000, 100000]);
        assert_eq!(nice_ticks(0, 5), vec![0, 1, 2, 3, 4]);
        assert_eq!(nice_ticks(3, 5), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_ticks_cover_max() {
        for max in [1, 7, 99, 443, 7443, 85000, 1_000_000, 123_456_789] {
            let ticks = nice_ticks(max, 5);
            assert_eq!(ticks.len(), 5);
            assert!(*ticks.last().unwrap() >= max, "max {}", max);
        }
    }

    #[test]
    fn test_ticks_near_u64_max() {
        let ticks = nice_ticks(18_000_000_000_000_000_000, 5);
        assert_eq!(ticks.len(), 5);
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*ticks.last().unwrap(), u64::MAX);

        let ticks = nice_ticks(u64::MAX, 5);
        assert_eq!(*ticks.last().unwrap(), u64::MAX);
    }

    #[test]
    fn test_render_huge_values() {
        let points = vec![
            ChartPoint::new("Aug 1", 85000),
            ChartPoint::new("Aug 2", 18_000_000_000_000_000_000),
        ];

        let svg = render_area(&points);

        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("<title>Aug 2: 18,000,000,000,000,000,000 Bookings</title>"));
    }

    #[test]
    fn test_layout_keeps_order_and_scales() {
        let config = AreaConfig::default();
        let layout = AreaLayout::compute(&trend(), &config);

        assert_eq!(layout.positions.len(), 5);
        for pair in layout.positions.windows(2) {
            assert!(pair[1].0 > pair[0].0);
        }
        assert_eq!(layout.positions[0].0, config.margin_left);
        assert_eq!(layout.positions[4].0, config.width - config.margin_right);

        // Zero tick sits on the baseline, top tick on the top margin
        assert!((layout.ticks[0].1 - layout.baseline).abs() < 1e-9);
        assert!((layout.ticks[4].1 - config.margin_top).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_is_centered() {
        let config = AreaConfig::default();
        let layout = AreaLayout::compute(&[ChartPoint::new("Aug 1", 10)], &config);
        let center = config.margin_left + (config.width - config.margin_left - config.margin_right) / 2.0;
        assert_eq!(layout.positions[0].0, center);
    }

    #[test]
    fn test_render_area() {
        let svg = render_area(&trend());

        assert!(svg.contains(">120k</text>"));
        assert!(svg.contains(">0k</text>"));
        assert!(svg.contains("url(#colorBookings)"));
        assert!(svg.contains("<title>Aug 1: 85,000 Bookings</title>"));
        assert_eq!(svg.matches("<circle").count(), 5);

        let first = svg.find(">Aug 1</text>").unwrap();
        let last = svg.find(">Aug 5</text>").unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_render_empty() {
        let svg = render_area(&[]);
        assert!(svg.contains("No data"));
        assert!(!svg.contains("<circle"));
    }
}
