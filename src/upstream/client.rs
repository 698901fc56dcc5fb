//! Pooled HTTP client for upstream calls.
//!
//! # Responsibilities
//! - Own the single `reqwest::Client` shared by all requests
//! - Apply the per-call deadline to every request, body included
//! - Cap how much of any upstream body is read into memory
//! - Translate transport and status failures into `UpstreamError`

use std::time::Duration;

use axum::body::Bytes;
use axum::http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::TimeoutConfig;
use crate::resilience::timeouts::with_deadline;
use crate::upstream::UpstreamError;

const MAX_REDIRECTS: usize = 10;

/// Upstream HTTP client with a fixed per-call deadline and body cap.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    deadline: Duration,
    max_body_bytes: usize,
}

impl UpstreamClient {
    /// Build the shared client from the timeout configuration.
    pub fn new(timeouts: &TimeoutConfig, max_body_bytes: usize) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            http,
            deadline: Duration::from_secs(timeouts.upstream_secs),
            max_body_bytes,
        })
    }

    /// Issue a HEAD request and return the `content-type` header, if any.
    ///
    /// The response status is not inspected. A header that is not valid
    /// visible ASCII is reported as absent.
    pub async fn probe_content_type(&self, url: &Url) -> Result<Option<String>, UpstreamError> {
        with_deadline(self.deadline, async {
            let response = self.http.head(url.as_str()).send().await?;
            Ok::<_, UpstreamError>(
                response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
            )
        })
        .await
    }

    /// GET a URL and return its body regardless of status.
    pub async fn fetch_body(&self, url: &Url) -> Result<Bytes, UpstreamError> {
        with_deadline(self.deadline, async {
            let response = self.http.get(url.as_str()).send().await?;
            Ok::<_, UpstreamError>(read_capped(response, self.max_body_bytes).await?)
        })
        .await
    }

    /// GET a URL as text with the given `Accept` and `User-Agent` headers.
    ///
    /// Non-success statuses are returned as [`UpstreamError::Status`].
    pub async fn fetch_text(
        &self,
        url: &Url,
        accept: &str,
        user_agent: &str,
    ) -> Result<String, UpstreamError> {
        with_deadline(self.deadline, async {
            let response = self
                .http
                .get(url.as_str())
                .header(ACCEPT, accept)
                .header(USER_AGENT, user_agent)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(UpstreamError::Status(status));
            }
            let body = read_capped(response, self.max_body_bytes).await?;
            Ok(String::from_utf8_lossy(&body).into_owned())
        })
        .await
    }

    /// GET a URL and decode a JSON body.
    ///
    /// Non-success statuses are returned as [`UpstreamError::Status`], bodies
    /// that do not decode as [`UpstreamError::Payload`].
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, UpstreamError> {
        with_deadline(self.deadline, async {
            let response = self.http.get(url.as_str()).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(UpstreamError::Status(status));
            }

            let body = read_capped(response, self.max_body_bytes).await?;
            serde_json::from_slice(&body).map_err(|e| UpstreamError::Payload(e.to_string()))
        })
        .await
    }
}

/// Read a response body, failing once it grows past `limit` bytes.
async fn read_capped(mut response: reqwest::Response, limit: usize) -> Result<Bytes, UpstreamError> {
    if response
        .content_length()
        .is_some_and(|len| len > limit as u64)
    {
        return Err(UpstreamError::TooLarge(limit));
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(UpstreamError::TooLarge(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(body))
}
