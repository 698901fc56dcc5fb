//! Upstream access subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (HEAD / GET with deadline)
//!     → origin server, reader service or PDF text service
//!     → body, or UpstreamError (error.rs)
//! ```

pub mod client;
pub mod error;

pub use client::UpstreamClient;
pub use error::UpstreamError;
