//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::connector::probe::ProbeStrategy;
use crate::relay::queue::OverflowPolicy;

/// Root configuration for the relay gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Admin listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Endpoint failover connector settings.
    pub connector: ConnectorConfig,

    /// Relay queue settings.
    pub relay: RelayQueueConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Admin API settings.
    pub admin: AdminConfig,
}

/// Admin listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address for the admin server (e.g., "127.0.0.1:8081").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Endpoint failover connector configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Ordered list of candidate endpoints. Earlier entries are preferred.
    ///
    /// Entries are URLs ("tcp://relay1.example.net:7011") or bare
    /// "host:port" pairs.
    pub endpoints: Vec<String>,

    /// Per-attempt connection timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Probing strategy.
    pub probe: ProbeStrategy,

    /// Number of simultaneous dials per wave for the racing strategy.
    /// Ignored by the sequential strategy.
    #[serde(default = "default_racing_window")]
    pub racing_window: usize,

    /// Whether a connection cycle started after exhaustion resets the
    /// cursor to the head of the list. When false the connector stays
    /// degraded until process restart.
    pub rewind_on_reconnect: bool,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            connect_timeout_ms: 15_000,
            probe: ProbeStrategy::Sequential,
            racing_window: default_racing_window(),
            rewind_on_reconnect: true,
        }
    }
}

fn default_racing_window() -> usize {
    2
}

/// Relay queue configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayQueueConfig {
    /// Maximum number of queued items. Unset means unbounded.
    pub capacity: Option<usize>,

    /// What happens to a push once capacity is reached.
    pub overflow: OverflowPolicy,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Bind address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}

/// Admin API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Bearer key required by the admin endpoints.
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_key: "admin-secret-key".to_string(),
        }
    }
}
