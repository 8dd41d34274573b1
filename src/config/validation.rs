//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check endpoint addresses parse into dialable targets
//! - Validate value ranges (timeouts > 0, capacity > 0 when set)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the config
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::connector::endpoint::Endpoint;
use crate::connector::probe::ProbeStrategy;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("connector has no endpoints configured")]
    NoEndpoints,

    #[error("invalid endpoint address '{address}': {reason}")]
    InvalidEndpoint { address: String, reason: String },

    #[error("connect_timeout_ms must be greater than zero")]
    ZeroConnectTimeout,

    #[error("racing_window must be greater than zero")]
    ZeroRacingWindow,

    #[error("relay capacity must be greater than zero when set")]
    ZeroCapacity,

    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.connector.endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }
    for address in &config.connector.endpoints {
        if let Err(e) = Endpoint::parse(address) {
            errors.push(ValidationError::InvalidEndpoint {
                address: address.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.connector.connect_timeout_ms == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }
    if config.connector.probe == ProbeStrategy::Racing && config.connector.racing_window == 0 {
        errors.push(ValidationError::ZeroRacingWindow);
    }

    if config.relay.capacity == Some(0) {
        errors.push(ValidationError::ZeroCapacity);
    }

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<std::net::SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
