//! Connection state snapshots.
//!
//! # States
//! - Idle: no cycle has settled yet (`ready=false, degraded=false`)
//! - Ready: one endpoint accepted (`ready=true, active_endpoint=Some`)
//! - Degraded: every endpoint failed (`degraded=true, active_endpoint=None`)
//!
//! # Design Decisions
//! - State lives behind a handle owned by one connector instance, so
//!   multiple instances (e.g., in tests) do not interfere
//! - Single writer (the connector); readers take lock-free snapshots

use arc_swap::ArcSwap;
use serde::Serialize;
use std::sync::Arc;

/// Outcome of the most recently settled connection cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionState {
    /// A live endpoint was found.
    pub ready: bool,

    /// Every endpoint failed; no live connection exists.
    pub degraded: bool,

    /// Address of the endpoint serving traffic, when ready.
    pub active_endpoint: Option<String>,
}

impl ConnectionState {
    /// State after an endpoint accepted.
    pub fn ready(endpoint: String) -> Self {
        Self {
            ready: true,
            degraded: false,
            active_endpoint: Some(endpoint),
        }
    }

    /// State after the endpoint list was exhausted.
    pub fn exhausted() -> Self {
        Self {
            ready: false,
            degraded: true,
            active_endpoint: None,
        }
    }
}

/// Shared read handle over a connector's state.
#[derive(Debug, Default)]
pub struct StateHandle {
    inner: ArcSwap<ConnectionState>,
}

impl StateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state. Cheap; no lock taken.
    pub fn snapshot(&self) -> ConnectionState {
        self.inner.load().as_ref().clone()
    }

    /// Replace the state. Connector-only; the probe mutex in the
    /// connector is the write serialization point.
    pub(crate) fn store(&self, state: ConnectionState) {
        self.inner.store(Arc::new(state));
    }
}
