//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_connect_attempts_total` (counter): dial attempts by endpoint
//!   and outcome (ok, error, timeout)
//! - `relay_connection_degraded` (gauge): 1 when every endpoint failed
//! - `relay_queue_depth` (gauge): current relay queue size

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one connection attempt and how it settled.
pub fn record_connect_attempt(endpoint: &str, outcome: &'static str) {
    metrics::counter!(
        "relay_connect_attempts_total",
        "endpoint" => endpoint.to_string(),
        "outcome" => outcome,
    )
    .increment(1);
}

/// Record whether the connector is in degraded mode.
pub fn record_connection_degraded(degraded: bool) {
    metrics::gauge!("relay_connection_degraded").set(if degraded { 1.0 } else { 0.0 });
}

/// Record the relay queue depth after a push or drain.
pub fn record_queue_depth(depth: usize) {
    metrics::gauge!("relay_queue_depth").set(depth as f64);
}
