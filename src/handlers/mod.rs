//! Request handlers.
//!
//! # Data Flow
//! ```text
//! dispatch (this module)
//!     → OPTIONS: 204 preflight
//!     → routing::Router::match_path
//!         /api/...       → api.rs    (HEAD sniff → HTML | pdf.rs | 415)
//!         /jina/...      → reader.rs (markdown → HTML)
//!         /extract-pdf   → pdf.rs    (JSON text → HTML page)
//!         no match       → 404
//! ```
//!
//! # Design Decisions
//! - Handlers never return errors; every failure becomes a response here
//! - Upstream calls inside one request run strictly one after another
//! - The request deadline is enforced here, so an expired request is logged
//!   and counted like any other failure and answered with 504

pub mod api;
pub mod pdf;
pub mod reader;

use std::time::Instant;

use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::http::StatusCode;
use axum::response::Response;
use url::form_urlencoded;

use crate::http::request::request_id;
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;
use crate::routing::RouteKind;
use crate::upstream::UpstreamError;

/// Catch-all handler: answers preflights, routes everything else by path.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers).to_string();
    let path = uri.path();

    if method == Method::OPTIONS {
        tracing::debug!(request_id = %request_id, path = %path, "Preflight request");
        metrics::record_request("preflight", 204, start_time);
        return response::preflight();
    }

    let Some(route) = state.router.match_path(path) else {
        tracing::warn!(request_id = %request_id, path = %path, "Unknown path");
        metrics::record_request("none", 404, start_time);
        return response::not_found();
    };

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        route = route.kind.name(),
        "Request received"
    );

    let branch = async {
        let response = match route.kind {
            RouteKind::Api => api::proxy(&state, route.remainder, uri.query()).await,
            RouteKind::Reader => reader::proxy(&state, route.remainder).await,
            RouteKind::ExtractPdf => {
                let target = query_param(uri.query(), "url");
                pdf::extract(&state, target.as_deref()).await
            }
        };
        Ok::<_, UpstreamError>(response)
    };

    let response = match with_deadline(state.request_deadline, branch).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                route = route.kind.name(),
                error = %e,
                "Request deadline exceeded"
            );
            failure(route.kind, e.gateway_status())
        }
    };

    tracing::info!(
        request_id = %request_id,
        route = route.kind.name(),
        status = response.status().as_u16(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Request completed"
    );
    metrics::record_request(route.kind.name(), response.status().as_u16(), start_time);

    response
}

/// The generic failure reply of a branch.
fn failure(kind: RouteKind, status: StatusCode) -> Response {
    match kind {
        RouteKind::Api => api::failure(status),
        RouteKind::Reader => reader::failure(status),
        RouteKind::ExtractPdf => pdf::failure(status),
    }
}

/// First decoded value of `name` in a query string.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
