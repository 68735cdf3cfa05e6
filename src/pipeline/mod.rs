//! Booking Stats Pipeline
//!
//! One fetch-normalize-fallback pipeline shared by every widget.
//!
//! ## Flow
//!
//! 1. `StatsFetcher` issues a single GET for the source's endpoint
//! 2. `parse_envelope` checks `{success: true, data: [...]}`
//! 3. `normalize` maps records to `ChartPoint`s (coercing, sorting by date)
//! 4. Any failure in 1-2 discards everything and yields the fallback data
//!
//! Nothing here retries, times out or polls: one request per activation.

mod error;
mod fetch;
mod normalize;
mod record;
mod types;

pub use error::{FieldCoercionError, PipelineError, PipelineResult};
pub use fetch::{parse_envelope, HttpFetcher, StatsFetcher};
pub use normalize::{date_label, normalize, DATE_LABEL_FORMAT};
pub use record::{parse_count, parse_date, parse_timestamp, BookingRecord};
pub use types::{total, ChartKind, ChartPoint, DataSourceConfig, FieldMap, Origin, Resolution};

/// Fetch the source's records, failing on any network or envelope problem
pub async fn fetch_records(
    fetcher: &dyn StatsFetcher,
    source: &DataSourceConfig,
) -> PipelineResult<Vec<BookingRecord>> {
    let body = fetcher.fetch(&source.endpoint).await?;
    parse_envelope(&body)
}

/// Run the whole pipeline for one source
///
/// Never fails: errors are logged and replaced by `source.fallback_data`.
pub async fn fetch_and_normalize(fetcher: &dyn StatsFetcher, source: &DataSourceConfig) -> Resolution {
    match fetch_records(fetcher, source).await {
        Ok(records) => {
            let points = normalize(&records, source);
            tracing::debug!(
                endpoint = %source.endpoint,
                records = records.len(),
                "Normalized live booking stats"
            );
            Resolution::live(points)
        }
        Err(e) => {
            tracing::warn!(
                endpoint = %source.endpoint,
                error = %e,
                "Booking stats unavailable, using fallback data"
            );
            Resolution::fallback(source.fallback_data.clone())
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted fetcher shared by tests across the crate

    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Canned reply for one endpoint
    #[derive(Clone)]
    pub enum Reply {
        Body(String),
        NetworkFailure,
    }

    /// Fetcher that answers from a fixed table and counts calls
    #[derive(Default)]
    pub struct ScriptedFetcher {
        replies: HashMap<String, Reply>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn body(mut self, endpoint: &str, body: impl Into<String>) -> Self {
            self.replies.insert(endpoint.to_string(), Reply::Body(body.into()));
            self
        }

        pub fn failing(mut self, endpoint: &str) -> Self {
            self.replies.insert(endpoint.to_string(), Reply::NetworkFailure);
            self
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatsFetcher for ScriptedFetcher {
        async fn fetch(&self, endpoint: &str) -> PipelineResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match self.replies.get(endpoint) {
                Some(Reply::Body(body)) => Ok(body.clone()),
                Some(Reply::NetworkFailure) | None => {
                    Err(PipelineError::Network("connection refused".to_string()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedFetcher;
    use super::*;

    fn daily_source() -> DataSourceConfig {
        DataSourceConfig::new(
            "/api/daily_stats",
            FieldMap::new("date", "bookings"),
            ChartKind::Area,
        )
        .sort_by_raw_date()
        .fallback(vec![
            ChartPoint::new("Aug 1", 85000),
            ChartPoint::new("Aug 2", 92000),
        ])
    }

    #[tokio::test]
    async fn test_live_data() {
        let fetcher = ScriptedFetcher::new().body(
            "/api/daily_stats",
            r#"{"success": true, "data": [
                {"date": "2024-08-02", "bookings": "92000"},
                {"date": "2024-08-01", "bookings": 85000}
            ]}"#,
        );

        let resolution = fetch_and_normalize(&fetcher, &daily_source()).await;

        assert_eq!(resolution.origin, Origin::Live);
        assert_eq!(
            resolution.points,
            vec![ChartPoint::new("Aug 1", 85000), ChartPoint::new("Aug 2", 92000)]
        );
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_uses_fallback() {
        let fetcher = ScriptedFetcher::new().failing("/api/daily_stats");
        let source = daily_source();

        let resolution = fetch_and_normalize(&fetcher, &source).await;

        assert!(resolution.is_fallback());
        assert_eq!(resolution.points, source.fallback_data);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_unsuccessful_response_uses_fallback() {
        for body in [
            r#"{"success": false, "data": [{"date": "2024-08-09", "bookings": 1}]}"#,
            r#"{"data": [{"date": "2024-08-09", "bookings": 1}]}"#,
            r#"{"success": true}"#,
            "<html>oops</html>",
        ] {
            let fetcher = ScriptedFetcher::new().body("/api/daily_stats", body);
            let source = daily_source();

            let resolution = fetch_and_normalize(&fetcher, &source).await;

            assert_eq!(resolution, Resolution::fallback(source.fallback_data.clone()));
        }
    }

    #[tokio::test]
    async fn test_empty_live_data_is_not_fallback() {
        let fetcher = ScriptedFetcher::new().body("/api/daily_stats", r#"{"success": true, "data": []}"#);

        let resolution = fetch_and_normalize(&fetcher, &daily_source()).await;

        assert_eq!(resolution, Resolution::live(vec![]));
    }
}
