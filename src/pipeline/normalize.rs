//! Record normalization
//!
//! Turns raw backend records into the ordered `ChartPoint` sequence a chart
//! consumes. Pure: the same records and source always give the same points.

use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::HashSet;

use super::record::BookingRecord;
use super::types::{ChartKind, ChartPoint, DataSourceConfig};

/// Display format for date labels ("Aug 1")
pub const DATE_LABEL_FORMAT: &str = "%b %-d";

/// Format a date the way the trend chart labels its x-axis
pub fn date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// Normalize records into chart points
///
/// One point per record, always. Bad values become 0. Date labels sort on the
/// instant they name, not on the displayed day; labels that should be dates
/// but aren't keep their raw text and sort after every real date.
pub fn normalize(records: &[BookingRecord], source: &DataSourceConfig) -> Vec<ChartPoint> {
    let fields = &source.field_map;

    let mut keyed: Vec<(Option<DateTime<FixedOffset>>, ChartPoint)> = records
        .iter()
        .map(|record| {
            let value = record.count(&fields.value_field).unwrap_or_else(|e| {
                tracing::debug!(endpoint = %source.endpoint, error = %e, "Defaulting count to 0");
                0
            });

            let raw_label = record.label(&fields.label_field).unwrap_or_else(|e| {
                tracing::debug!(endpoint = %source.endpoint, error = %e, "Record has no label");
                String::new()
            });

            if source.sort_by_raw_date {
                match record.timestamp(&fields.label_field) {
                    Ok(at) => (Some(at), ChartPoint::new(date_label(at.date_naive()), value)),
                    Err(e) => {
                        tracing::debug!(endpoint = %source.endpoint, error = %e, "Unparseable date label");
                        (None, ChartPoint::new(raw_label, value))
                    }
                }
            } else {
                (None, ChartPoint::new(raw_label, value))
            }
        })
        .collect();

    if source.sort_by_raw_date {
        // Stable: equal instants keep backend order, undated records go last
        keyed.sort_by_key(|(at, _)| (at.is_none(), *at));
    }

    let mut points: Vec<ChartPoint> = keyed.into_iter().map(|(_, point)| point).collect();

    if source.kind == ChartKind::Pie && !source.palette.is_empty() {
        for (idx, point) in points.iter_mut().enumerate() {
            point.color_hint = Some(source.palette[idx % source.palette.len()].clone());
        }
    }

    warn_on_duplicate_labels(&points, &source.endpoint);

    points
}

fn warn_on_duplicate_labels(points: &[ChartPoint], endpoint: &str) {
    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        if !seen.insert(point.label.as_str()) {
            tracing::warn!(endpoint = %endpoint, label = %point.label, "Duplicate chart label");
        }
    }
}
