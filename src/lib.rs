//! Document proxy library.
//!
//! Routes `/api/`, `/jina/` and `/extract-pdf` requests to an arbitrary
//! origin, a markdown reader service and a PDF text service respectively,
//! and returns CORS-annotated HTML.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod resilience;
pub mod routing;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
