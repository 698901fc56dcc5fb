//! Reader service proxy (`/jina/<target>`).

use axum::http::StatusCode;
use axum::response::Response;
use url::Url;

use crate::http::response;
use crate::http::server::AppState;
use crate::render::markdown_to_html;
use crate::upstream::UpstreamError;

const ACCEPT_MARKUP: &str = "text/markdown, text/html";
const UPSTREAM_STATUS_BODY: &str = "Error fetching reader content";
const FAILURE_BODY: &str = "Error processing reader request";

/// Join the reader base URL and the path remainder.
pub fn reader_url(base: &str, target: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{}/{}", base.trim_end_matches('/'), target))
}

/// Handle a reader proxy request.
pub async fn proxy(state: &AppState, target: &str) -> Response {
    match fetch_as_html(state, target).await {
        Ok(html) => {
            tracing::info!(target_path = %target, "Reader content converted to HTML");
            response::html(StatusCode::OK, html)
        }
        Err(UpstreamError::Status(status)) => {
            tracing::error!(target_path = %target, status = %status, "Reader request failed");
            response::text(status, UPSTREAM_STATUS_BODY)
        }
        Err(e) => {
            tracing::error!(target_path = %target, error = %e, "Error processing reader request");
            failure(e.gateway_status())
        }
    }
}

/// Generic failure reply for this branch.
pub fn failure(status: StatusCode) -> Response {
    response::text(status, FAILURE_BODY)
}

async fn fetch_as_html(state: &AppState, target: &str) -> Result<String, UpstreamError> {
    let url = reader_url(&state.upstreams.reader_base_url, target)?;
    tracing::info!(reader_url = %url, "Calling reader service");

    let markdown = state
        .client
        .fetch_text(&url, ACCEPT_MARKUP, &state.upstreams.user_agent)
        .await?;

    Ok(markdown_to_html(&markdown))
}
