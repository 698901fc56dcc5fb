//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream calls with a deadline
//! - Cancel operations cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - Timed-out upstream calls return 504 Gateway Timeout

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::upstream::UpstreamError;

/// Run an upstream operation under `deadline`.
///
/// The inner future is dropped when the deadline expires, which cancels the
/// in-flight request.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout(deadline)),
    }
}
