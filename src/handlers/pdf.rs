//! PDF text extraction (`/extract-pdf?url=...`).
//!
//! Also called in-process by the generic proxy when a target turns out to be
//! a PDF.

use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use url::Url;

use crate::http::response;
use crate::http::server::AppState;
use crate::render::pdf_text_page;
use crate::upstream::UpstreamError;

const MISSING_URL_BODY: &str = "Error: No PDF URL provided";
const FAILURE_BODY: &str = "Error processing PDF text.";

/// Body returned by the extraction service.
#[derive(Debug, Deserialize)]
struct ExtractedText {
    text: String,
}

/// Build the extraction service call for `target`.
pub fn extraction_url(endpoint: &str, target: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut().append_pair("url", target);
    Ok(url)
}

/// Extract text from the PDF at `target` and render it as an HTML page.
///
/// An absent or empty `target` is a 400.
pub async fn extract(state: &AppState, target: Option<&str>) -> Response {
    let Some(target) = target.filter(|t| !t.is_empty()) else {
        tracing::error!("No PDF URL provided in query parameters");
        return response::text(StatusCode::BAD_REQUEST, MISSING_URL_BODY);
    };

    match extract_text(state, target).await {
        Ok(text) => {
            tracing::info!(pdf_url = %target, chars = text.len(), "PDF text extracted");
            response::html(StatusCode::OK, pdf_text_page(&text))
        }
        Err(e) => {
            tracing::error!(pdf_url = %target, error = %e, "Error fetching or processing PDF text");
            failure(e.gateway_status())
        }
    }
}

/// Generic failure reply for this branch.
pub fn failure(status: StatusCode) -> Response {
    response::text(status, FAILURE_BODY)
}

async fn extract_text(state: &AppState, target: &str) -> Result<String, UpstreamError> {
    let url = extraction_url(&state.upstreams.pdf_extract_url, target)?;
    tracing::info!(extraction_url = %url, "Calling PDF extraction service");

    let extracted: ExtractedText = state.client.fetch_json(&url).await?;
    Ok(extracted.text)
}
