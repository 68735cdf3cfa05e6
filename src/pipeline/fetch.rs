//! Stats Backend Fetching
//!
//! The `StatsFetcher` trait is the seam between the pipeline and the network.
//! `HttpFetcher` is the reqwest implementation used in production; tests plug
//! in their own.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::error::{PipelineError, PipelineResult};
use super::record::BookingRecord;

/// Fetches the raw body of a stats endpoint
#[async_trait]
pub trait StatsFetcher: Send + Sync {
    /// Issue one GET for `endpoint` and return the response body
    async fn fetch(&self, endpoint: &str) -> PipelineResult<String>;
}

/// HTTP fetcher for the booking stats backend
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    /// Create a fetcher rooted at `base_url` (e.g. "http://localhost:5000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a fetcher sharing an existing client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl StatsFetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &str) -> PipelineResult<String> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, "Fetching booking stats");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(PipelineError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Response envelope shared by every stats endpoint
#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// Validate the `{success, data}` envelope and extract the records
pub fn parse_envelope(body: &str) -> PipelineResult<Vec<BookingRecord>> {
    let envelope: StatsEnvelope = serde_json::from_str(body)?;

    if !envelope.success {
        return Err(PipelineError::MalformedResponse(
            "`success` flag is absent or false".to_string(),
        ));
    }

    let data = envelope.data.ok_or_else(|| {
        PipelineError::MalformedResponse("`data` array is missing".to_string())
    })?;

    Ok(data.into_iter().map(BookingRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    /// Serve a tiny stats backend on an ephemeral port
    async fn spawn_backend() -> String {
        let app = Router::new()
            .route(
                "/api/daily_stats",
                get(|| async {
                    r#"{"success": true, "data": [{"date": "2024-08-01", "bookings": 85000}]}"#
                }),
            )
            .route(
                "/api/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_url_joining() {
        let fetcher = HttpFetcher::new("http://localhost:5000/");
        assert_eq!(fetcher.base_url(), "http://localhost:5000");
        assert_eq!(fetcher.url("/api/daily_stats"), "http://localhost:5000/api/daily_stats");
        assert_eq!(fetcher.url("api/os_stats"), "http://localhost:5000/api/os_stats");
        assert_eq!(fetcher.url("https://stats.example/x"), "https://stats.example/x");
    }

    #[test]
    fn test_parse_envelope_ok() {
        let records = parse_envelope(r#"{"success": true, "data": [{"a": 1}, {"a": 2}]}"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_envelope_rejects_bad_shapes() {
        let cases = [
            "not json",
            r#"{"data": []}"#,
            r#"{"success": false, "data": []}"#,
            r#"{"success": true}"#,
            r#"{"success": true, "data": null}"#,
            r#"{"success": true, "data": {"a": 1}}"#,
            r#"{"success": "yes", "data": []}"#,
            r#"[1, 2, 3]"#,
        ];

        for body in cases {
            let result = parse_envelope(body);
            assert!(
                matches!(result, Err(PipelineError::MalformedResponse(_))),
                "expected malformed for {}",
                body
            );
        }
    }

    #[tokio::test]
    async fn test_http_fetch_success() {
        let base = spawn_backend().await;
        let fetcher = HttpFetcher::new(base);

        let body = fetcher.fetch("/api/daily_stats").await.unwrap();
        let records = parse_envelope(&body).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].count("bookings"), Ok(85000));
    }

    #[tokio::test]
    async fn test_http_fetch_status_error() {
        let base = spawn_backend().await;
        let fetcher = HttpFetcher::new(base);

        let result = fetcher.fetch("/api/broken").await;
        assert!(matches!(result, Err(PipelineError::Status { status: 500 })));

        let result = fetcher.fetch("/api/missing").await;
        assert!(matches!(result, Err(PipelineError::Status { status: 404 })));
    }

    #[tokio::test]
    async fn test_http_fetch_network_error() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new(format!("http://{}", addr));
        let result = fetcher.fetch("/api/daily_stats").await;

        assert!(matches!(result, Err(PipelineError::Network(_))));
    }
}
