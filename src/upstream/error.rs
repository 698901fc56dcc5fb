//! Upstream error definitions.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to an upstream service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Target URL could not be parsed.
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, TLS, redirect or body transfer failed.
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream call did not finish before its deadline.
    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// Upstream body exceeded the configured size limit.
    #[error("upstream body exceeds {0} bytes")]
    TooLarge(usize),

    /// Upstream body was not in the expected shape.
    #[error("malformed upstream payload: {0}")]
    Payload(String),
}

impl UpstreamError {
    /// Status code reported to the caller for this failure.
    pub fn gateway_status(&self) -> StatusCode {
        match self {
            UpstreamError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
