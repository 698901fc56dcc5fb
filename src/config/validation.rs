//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts and body limit > 0, addresses parse)
//! - Check upstream URLs are absolute http(s) URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid upstream URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}: must be greater than zero")]
    ZeroTimeout(&'static str),

    /// The generic proxy chains two upstream calls, so both must fit.
    #[error(
        "twice timeouts.upstream_secs ({upstream}) exceeds timeouts.request_secs ({request})"
    )]
    UpstreamExceedsRequest { upstream: u64, request: u64 },

    #[error("upstreams.max_body_bytes: must be greater than zero")]
    ZeroBodyLimit,

    #[error("upstreams.user_agent: must be a non-empty header value")]
    InvalidUserAgent,

    #[error("observability.log_level: unknown level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    check_url(
        "upstreams.reader_base_url",
        &config.upstreams.reader_base_url,
        &mut errors,
    );
    check_url(
        "upstreams.pdf_extract_url",
        &config.upstreams.pdf_extract_url,
        &mut errors,
    );

    let agent = config.upstreams.user_agent.trim();
    if agent.is_empty() || HeaderValue::from_str(agent).is_err() {
        errors.push(ValidationError::InvalidUserAgent);
    }
    if config.upstreams.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let timeouts = &config.timeouts;
    for (field, value) in [
        ("timeouts.connect_secs", timeouts.connect_secs),
        ("timeouts.request_secs", timeouts.request_secs),
        ("timeouts.upstream_secs", timeouts.upstream_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }
    if timeouts.upstream_secs.saturating_mul(2) > timeouts.request_secs {
        errors.push(ValidationError::UpstreamExceedsRequest {
            upstream: timeouts.upstream_secs,
            request: timeouts.request_secs,
        });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let reason = match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => return,
        Ok(url) => format!("unsupported scheme '{}'", url.scheme()),
        Err(e) => e.to_string(),
    };
    errors.push(ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    });
}
