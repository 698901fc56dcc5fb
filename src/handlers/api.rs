//! Generic URL proxy (`/api/<target>`).
//!
//! Sniffs the target's content type with a HEAD request, then either returns
//! the HTML verbatim or hands PDFs to the extraction handler in-process.

use axum::http::StatusCode;
use axum::response::Response;
use url::form_urlencoded;
use url::Url;

use crate::handlers::pdf;
use crate::http::response;
use crate::http::server::AppState;
use crate::upstream::UpstreamError;

const UNSUPPORTED_BODY: &str = "<h1>Unsupported content type</h1>";
const FAILURE_BODY: &str = "<h1>Error processing URL</h1>";

/// How the target's content type is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Pdf,
    Html,
    Unsupported,
}

/// Classify a HEAD `content-type` value. A missing header is unsupported.
pub fn classify(content_type: Option<&str>) -> ContentKind {
    let Some(content_type) = content_type else {
        return ContentKind::Unsupported;
    };

    let content_type = content_type.to_ascii_lowercase();
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    if essence == "application/pdf" {
        ContentKind::Pdf
    } else if content_type.contains("text/html") {
        ContentKind::Html
    } else {
        ContentKind::Unsupported
    }
}

/// Build the upstream URL from the path remainder and the inbound query.
///
/// `http://` is assumed when the target has no http(s) scheme. Query pairs
/// are decoded and re-encoded onto the target.
pub fn target_url(target: &str, query: Option<&str>) -> Result<Url, url::ParseError> {
    let mut url = if has_http_scheme(target) {
        Url::parse(target)?
    } else {
        Url::parse(&format!("http://{target}"))?
    };

    if let Some(query) = query {
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
    }

    Ok(url)
}

fn has_http_scheme(target: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        target
            .get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// Handle a generic proxy request.
pub async fn proxy(state: &AppState, target: &str, query: Option<&str>) -> Response {
    match fetch_target(state, target, query).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(target_path = %target, error = %e, "Error processing URL");
            failure(e.gateway_status())
        }
    }
}

/// Generic failure reply for this branch.
pub fn failure(status: StatusCode) -> Response {
    response::html(status, FAILURE_BODY)
}

async fn fetch_target(
    state: &AppState,
    target: &str,
    query: Option<&str>,
) -> Result<Response, UpstreamError> {
    let url = target_url(target, query)?;
    tracing::info!(target_url = %url, "Target URL constructed");

    let content_type = state.client.probe_content_type(&url).await?;
    tracing::info!(
        target_url = %url,
        content_type = content_type.as_deref().unwrap_or("<none>"),
        "Content type detected"
    );

    match classify(content_type.as_deref()) {
        ContentKind::Pdf => {
            tracing::info!(target_url = %url, "PDF detected, delegating to extraction");
            Ok(pdf::extract(state, Some(url.as_str())).await)
        }
        ContentKind::Html => {
            let body = state.client.fetch_body(&url).await?;
            tracing::info!(target_url = %url, bytes = body.len(), "HTML content fetched");
            Ok(response::html(StatusCode::OK, body))
        }
        ContentKind::Unsupported => {
            tracing::warn!(
                target_url = %url,
                content_type = content_type.as_deref().unwrap_or("<none>"),
                "Unsupported content type"
            );
            Ok(response::html(StatusCode::UNSUPPORTED_MEDIA_TYPE, UNSUPPORTED_BODY))
        }
    }
}
