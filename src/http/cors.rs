//! CORS annotation.
//!
//! Every response leaving the proxy, errors and preflights included, gets the
//! same four headers. Installed as the outermost response-mapping middleware.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";
pub const ALLOW_CREDENTIALS: &str = "true";

/// Set the CORS headers, replacing any values already present.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static(ALLOW_CREDENTIALS),
    );
}

/// Return `response` with the CORS headers set.
pub fn annotate(mut response: Response) -> Response {
    apply_cors_headers(response.headers_mut());
    response
}

/// Middleware adapter for `axum::middleware::map_response`.
pub async fn cors_middleware(response: Response) -> Response {
    annotate(response)
}
