//! Response construction.
//!
//! # Responsibilities
//! - Build HTML and short text responses with explicit content types
//! - Hold the fixed bodies for router-level replies (404, preflight)
//!
//! # Design Decisions
//! - HTML responses carry exactly `text/html`
//! - Error bodies are generic; details go to the log, never to the caller
//! - CORS headers are added by middleware, not here

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

const TEXT_HTML: &str = "text/html";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// An HTML response with the given status.
pub fn html(status: StatusCode, body: impl Into<Body>) -> Response {
    let body: Body = body.into();
    (status, [(header::CONTENT_TYPE, TEXT_HTML)], body).into_response()
}

/// A short plain-text response with the given status.
pub fn text(status: StatusCode, body: impl Into<Body>) -> Response {
    let body: Body = body.into();
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}

/// Reply for paths that match no route.
pub fn not_found() -> Response {
    text(StatusCode::NOT_FOUND, "Not Found")
}

/// Reply for CORS preflight requests.
pub fn preflight() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
