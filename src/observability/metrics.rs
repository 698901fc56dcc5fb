//! Metrics collection and exposition.
//!
//! # Metrics
//! - `docproxy_requests_total` (counter): total requests by route, status
//! - `docproxy_request_duration_seconds` (histogram): latency distribution by route
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter only runs when enabled in config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from inside the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(route: &'static str, status: u16, start_time: Instant) {
    metrics::counter!(
        "docproxy_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("docproxy_request_duration_seconds", "route" => route)
        .record(start_time.elapsed().as_secs_f64());
}
