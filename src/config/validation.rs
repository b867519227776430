//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the backend URL and value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("listener.max_body_size must be greater than zero")]
    BodyLimit,

    #[error("backend.url '{url}' is invalid: {reason}")]
    BackendUrl { url: String, reason: String },

    #[error("backend.timeout_ms must be greater than zero")]
    Timeout,

    #[error("backend.connect_timeout_ms must be greater than zero")]
    ConnectTimeout,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),

    #[error("static_files.index_path must not be empty when static files are enabled")]
    IndexPath,
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::BodyLimit);
    }

    match Url::parse(&config.backend.url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::BackendUrl {
                url: config.backend.url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::BackendUrl {
            url: config.backend.url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.backend.timeout_ms == 0 {
        errors.push(ValidationError::Timeout);
    }
    if config.backend.connect_timeout_ms == 0 {
        errors.push(ValidationError::ConnectTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.static_files.enabled && config.static_files.index_path.trim().is_empty() {
        errors.push(ValidationError::IndexPath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
