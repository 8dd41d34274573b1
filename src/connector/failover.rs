//! The endpoint failover connector.
//!
//! # Responsibilities
//! - Establish a working connection to exactly one of the configured
//!   endpoints, preferring earlier entries
//! - Publish the settled outcome through the state handle
//! - Serialize overlapping connection cycles
//!
//! # Design Decisions
//! - Endpoint failures never propagate as errors; exhaustion flips the
//!   state to degraded and callers poll for it
//! - The cursor and probe pass share one async mutex, so a second
//!   `connect` waits for the first to settle instead of interleaving
//! - No overall deadline; worst case is the sum of per-attempt timeouts

use std::time::Duration;

use tokio::sync::Mutex;

use crate::config::ConnectorConfig;
use crate::connector::endpoint::EndpointRegistry;
use crate::connector::probe::{
    Dialer, ProbePolicy, ProbeStrategy, RacingProbe, SequentialProbe, TcpDialer,
};
use crate::connector::state::{ConnectionState, StateHandle};
use crate::observability::metrics;

/// Walks the ordered endpoint list until one accepts or the list is
/// exhausted.
pub struct FailoverConnector {
    registry: EndpointRegistry,
    state: StateHandle,
    dialer: Box<dyn Dialer>,
    policy: Box<dyn ProbePolicy>,
    attempt_timeout: Duration,
    rewind_on_reconnect: bool,
    /// Next candidate index. Doubles as the critical section for a
    /// whole connection cycle.
    cursor: Mutex<usize>,
}

impl FailoverConnector {
    /// Build a connector over the TCP transport.
    pub fn new(registry: EndpointRegistry, config: &ConnectorConfig) -> Self {
        Self::with_dialer(registry, Box::new(TcpDialer), config)
    }

    /// Build a connector with a custom transport.
    pub fn with_dialer(
        registry: EndpointRegistry,
        dialer: Box<dyn Dialer>,
        config: &ConnectorConfig,
    ) -> Self {
        let policy: Box<dyn ProbePolicy> = match config.probe {
            ProbeStrategy::Sequential => Box::new(SequentialProbe),
            ProbeStrategy::Racing => Box::new(RacingProbe::new(config.racing_window)),
        };

        Self {
            registry,
            state: StateHandle::new(),
            dialer,
            policy,
            attempt_timeout: Duration::from_millis(config.connect_timeout_ms),
            rewind_on_reconnect: config.rewind_on_reconnect,
            cursor: Mutex::new(0),
        }
    }

    /// Read handle over the connection state.
    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    /// Run one connection cycle.
    ///
    /// Attempts endpoints from the cursor onward, each under the
    /// configured timeout. The first acceptance wins and later entries
    /// are not tried. If every endpoint fails the connector enters
    /// degraded mode; that is a state, not an error, and this function
    /// returns normally either way.
    pub async fn connect(&self) {
        let mut cursor = self.cursor.lock().await;

        if self.rewind_on_reconnect {
            *cursor = 0;
        } else if !self.registry.is_empty() && *cursor >= self.registry.len() {
            tracing::warn!("Connector exhausted and rewind disabled; staying degraded");
            return;
        }

        tracing::info!(
            endpoints = self.registry.len(),
            start = *cursor,
            "Connection cycle starting"
        );

        let outcome = self
            .policy
            .probe(
                self.dialer.as_ref(),
                &self.registry,
                *cursor,
                self.attempt_timeout,
            )
            .await;
        *cursor = outcome.cursor;

        if let Some(endpoint) = outcome.connected.and_then(|index| self.registry.get(index)) {
            self.state
                .store(ConnectionState::ready(endpoint.as_str().to_string()));
            metrics::record_connection_degraded(false);
            tracing::info!(endpoint = %endpoint, "Connection established");
            return;
        }

        self.state.store(ConnectionState::exhausted());
        metrics::record_connection_degraded(true);
        tracing::error!(
            endpoints = self.registry.len(),
            "All endpoints failed; entering degraded mode"
        );
    }
}

impl std::fmt::Debug for FailoverConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailoverConnector")
            .field("endpoints", &self.registry.len())
            .field("attempt_timeout", &self.attempt_timeout)
            .field("rewind_on_reconnect", &self.rewind_on_reconnect)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::probe::test_support::ScriptedDialer;
    use std::sync::Arc;

    fn config(rewind: bool) -> ConnectorConfig {
        ConnectorConfig {
            connect_timeout_ms: 50,
            rewind_on_reconnect: rewind,
            ..ConnectorConfig::default()
        }
    }

    fn connector(
        addresses: &[&str],
        accepts: &[(&str, bool)],
        rewind: bool,
    ) -> (FailoverConnector, Arc<ScriptedDialer>) {
        let registry = EndpointRegistry::from_addresses(
            &addresses.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
        );
        let dialer = Arc::new(ScriptedDialer::new(accepts));
        let connector =
            FailoverConnector::with_dialer(registry, Box::new(SharedDialer(dialer.clone())), &config(rewind));
        (connector, dialer)
    }

    /// Lets a test keep a handle on the boxed dialer.
    struct SharedDialer(Arc<ScriptedDialer>);

    impl Dialer for SharedDialer {
        fn dial<'a>(
            &'a self,
            endpoint: &'a crate::connector::endpoint::Endpoint,
        ) -> futures_util::future::BoxFuture<'a, std::io::Result<()>> {
            self.0.dial(endpoint)
        }
    }

    #[tokio::test]
    async fn test_attempts_in_order_until_success() {
        let (connector, dialer) = connector(
            &["a:1", "b:2", "c:3"],
            &[("a:1", false), ("b:2", false), ("c:3", true)],
            true,
        );

        connector.connect().await;

        let state = connector.state().snapshot();
        assert!(state.ready);
        assert!(!state.degraded);
        assert_eq!(state.active_endpoint.as_deref(), Some("c:3"));
        assert_eq!(dialer.attempts(), vec!["a:1", "b:2", "c:3"]);
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let (connector, dialer) = connector(
            &["a:1", "b:2", "c:3"],
            &[("a:1", true), ("b:2", true), ("c:3", true)],
            true,
        );

        connector.connect().await;

        assert_eq!(
            connector.state().snapshot().active_endpoint.as_deref(),
            Some("a:1")
        );
        assert_eq!(dialer.attempts(), vec!["a:1"]);
    }

    #[tokio::test]
    async fn test_exhaustion_sets_degraded() {
        let (connector, _dialer) =
            connector(&["a:1", "b:2"], &[("a:1", false), ("b:2", false)], true);

        connector.connect().await;

        let state = connector.state().snapshot();
        assert!(!state.ready);
        assert!(state.degraded);
        assert_eq!(state.active_endpoint, None);
    }

    #[tokio::test]
    async fn test_empty_registry_degrades_immediately() {
        let (connector, dialer) = connector(&[], &[], true);

        connector.connect().await;

        assert!(connector.state().snapshot().degraded);
        assert!(dialer.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_rewind_retries_from_start() {
        let (connector, dialer) =
            connector(&["a:1", "b:2"], &[("a:1", false), ("b:2", false)], true);

        connector.connect().await;
        assert!(connector.state().snapshot().degraded);

        dialer.set_accepts("a:1", true);
        connector.connect().await;

        let state = connector.state().snapshot();
        assert!(state.ready);
        assert_eq!(state.active_endpoint.as_deref(), Some("a:1"));
        assert_eq!(dialer.attempts(), vec!["a:1", "b:2", "a:1"]);
    }

    #[tokio::test]
    async fn test_no_rewind_stays_degraded() {
        let (connector, dialer) =
            connector(&["a:1", "b:2"], &[("a:1", false), ("b:2", false)], false);

        connector.connect().await;
        assert!(connector.state().snapshot().degraded);

        dialer.set_accepts("a:1", true);
        connector.connect().await;

        assert!(connector.state().snapshot().degraded);
        // Cursor parked past the end; nothing was re-attempted.
        assert_eq!(dialer.attempts(), vec!["a:1", "b:2"]);
    }

    #[tokio::test]
    async fn test_state_handles_are_independent_across_instances() {
        let (first, _) = connector(&["a:1"], &[("a:1", true)], true);
        let (second, _) = connector(&["a:1"], &[("a:1", false)], true);

        first.connect().await;
        second.connect().await;

        assert!(first.state().snapshot().ready);
        assert!(second.state().snapshot().degraded);
    }
}
