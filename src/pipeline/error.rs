//! Pipeline error types
//!
//! Every error here is absorbed at the widget boundary and turned into
//! the widget's fallback data. None of them reach the rendered page.

use thiserror::Error;

/// Errors that abort a single fetch-and-normalize run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The request never produced a response (connect, DNS, reset, ...)
    #[error("Network failure: {0}")]
    Network(String),

    /// The backend answered with a non-success HTTP status
    #[error("Backend returned HTTP {status}")]
    Status { status: u16 },

    /// Body is not JSON, or lacks `success: true` / a `data` array
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PipelineError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            PipelineError::Status {
                status: status.as_u16(),
            }
        } else {
            PipelineError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::MalformedResponse(err.to_string())
    }
}

/// A single field of a single record could not be coerced.
///
/// Never fatal: the field falls back to its default value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldCoercionError {
    #[error("field `{field}` is missing")]
    Missing { field: String },

    #[error("field `{field}` is not numeric: {raw}")]
    NotNumeric { field: String, raw: String },

    #[error("field `{field}` is not a date: {raw}")]
    NotADate { field: String, raw: String },
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
