//! Probing strategies and the dialing transport.
//!
//! # Responsibilities
//! - Define the transport seam (`Dialer`) used to reach an endpoint
//! - Walk the candidate list under a per-attempt timeout
//! - Report which endpoint, if any, accepted
//!
//! # Design Decisions
//! - Strategy is pluggable behind `ProbePolicy`; sequential is the
//!   default, racing probes a bounded window in parallel
//! - Individual attempt failures are logged and never surfaced as errors
//! - Earlier entries win ties in the racing strategy

use std::time::Duration;

use futures_util::future::{join_all, BoxFuture};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::time;

use crate::connector::endpoint::{Endpoint, EndpointRegistry};
use crate::observability::metrics;

/// Transport used to open a connection to one endpoint.
///
/// Implementations verify reachability; the settled active endpoint is
/// handed to consumers through the connection state, not as a socket.
pub trait Dialer: Send + Sync {
    fn dial<'a>(&'a self, endpoint: &'a Endpoint) -> BoxFuture<'a, std::io::Result<()>>;
}

/// TCP dialer. Resolves the host, opens a connection, then closes it.
#[derive(Debug, Default)]
pub struct TcpDialer;

impl Dialer for TcpDialer {
    fn dial<'a>(&'a self, endpoint: &'a Endpoint) -> BoxFuture<'a, std::io::Result<()>> {
        Box::pin(async move {
            let stream = TcpStream::connect((endpoint.host(), endpoint.port())).await?;
            drop(stream);
            Ok(())
        })
    }
}

/// Configured probing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeStrategy {
    #[default]
    Sequential,
    Racing,
}

/// Result of one probe pass over the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Index of the endpoint that accepted, if any.
    pub connected: Option<usize>,

    /// Cursor position after the pass settled.
    pub cursor: usize,
}

/// A probing strategy over the ordered candidate list.
pub trait ProbePolicy: Send + Sync {
    fn probe<'a>(
        &'a self,
        dialer: &'a dyn Dialer,
        registry: &'a EndpointRegistry,
        start: usize,
        attempt_timeout: Duration,
    ) -> BoxFuture<'a, ProbeOutcome>;
}

async fn attempt(
    dialer: &dyn Dialer,
    endpoint: &Endpoint,
    attempt_timeout: Duration,
) -> bool {
    match time::timeout(attempt_timeout, dialer.dial(endpoint)).await {
        Ok(Ok(())) => {
            tracing::info!(endpoint = %endpoint, "Endpoint accepted connection");
            metrics::record_connect_attempt(endpoint.as_str(), "ok");
            true
        }
        Ok(Err(e)) => {
            tracing::warn!(endpoint = %endpoint, error = %e, "Endpoint connection failed");
            metrics::record_connect_attempt(endpoint.as_str(), "error");
            false
        }
        Err(_) => {
            tracing::warn!(
                endpoint = %endpoint,
                timeout_ms = attempt_timeout.as_millis() as u64,
                "Endpoint connection timed out"
            );
            metrics::record_connect_attempt(endpoint.as_str(), "timeout");
            false
        }
    }
}

/// One endpoint at a time, in list order.
#[derive(Debug, Default)]
pub struct SequentialProbe;

impl ProbePolicy for SequentialProbe {
    fn probe<'a>(
        &'a self,
        dialer: &'a dyn Dialer,
        registry: &'a EndpointRegistry,
        start: usize,
        attempt_timeout: Duration,
    ) -> BoxFuture<'a, ProbeOutcome> {
        Box::pin(async move {
            let mut cursor = start;
            while let Some(endpoint) = registry.get(cursor) {
                if attempt(dialer, endpoint, attempt_timeout).await {
                    return ProbeOutcome {
                        connected: Some(cursor),
                        cursor,
                    };
                }
                cursor += 1;
            }
            ProbeOutcome {
                connected: None,
                cursor,
            }
        })
    }
}

/// Waves of simultaneous dials. Within a wave the earliest-listed
/// success wins, preserving the configured preference order.
#[derive(Debug)]
pub struct RacingProbe {
    window: usize,
}

impl RacingProbe {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }
}

impl ProbePolicy for RacingProbe {
    fn probe<'a>(
        &'a self,
        dialer: &'a dyn Dialer,
        registry: &'a EndpointRegistry,
        start: usize,
        attempt_timeout: Duration,
    ) -> BoxFuture<'a, ProbeOutcome> {
        Box::pin(async move {
            let endpoints = registry.as_slice();
            let mut cursor = start.min(endpoints.len());

            while cursor < endpoints.len() {
                let wave_end = (cursor + self.window).min(endpoints.len());
                let wave = &endpoints[cursor..wave_end];

                let results = join_all(
                    wave.iter()
                        .map(|endpoint| attempt(dialer, endpoint, attempt_timeout)),
                )
                .await;

                if let Some(offset) = results.iter().position(|accepted| *accepted) {
                    return ProbeOutcome {
                        connected: Some(cursor + offset),
                        cursor: cursor + offset,
                    };
                }
                cursor = wave_end;
            }

            ProbeOutcome {
                connected: None,
                cursor,
            }
        })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{BlackHoleDialer, ScriptedDialer};
    use super::*;

    fn registry(addresses: &[&str]) -> EndpointRegistry {
        EndpointRegistry::from_addresses(
            &addresses.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
        )
    }

    const TIMEOUT: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn test_sequential_stops_at_first_success() {
        let dialer = ScriptedDialer::new(&[("a:1", false), ("b:2", true), ("c:3", true)]);
        let registry = registry(&["a:1", "b:2", "c:3"]);

        let outcome = SequentialProbe
            .probe(&dialer, &registry, 0, TIMEOUT)
            .await;

        assert_eq!(outcome.connected, Some(1));
        assert_eq!(outcome.cursor, 1);
        assert_eq!(dialer.attempts(), vec!["a:1", "b:2"]);
    }

    #[tokio::test]
    async fn test_sequential_exhausts_in_order() {
        let dialer = ScriptedDialer::new(&[("a:1", false), ("b:2", false)]);
        let registry = registry(&["a:1", "b:2"]);

        let outcome = SequentialProbe
            .probe(&dialer, &registry, 0, TIMEOUT)
            .await;

        assert_eq!(outcome.connected, None);
        assert_eq!(outcome.cursor, 2);
        assert_eq!(dialer.attempts(), vec!["a:1", "b:2"]);
    }

    #[tokio::test]
    async fn test_sequential_respects_start_cursor() {
        let dialer = ScriptedDialer::new(&[("a:1", true), ("b:2", true)]);
        let registry = registry(&["a:1", "b:2"]);

        let outcome = SequentialProbe
            .probe(&dialer, &registry, 1, TIMEOUT)
            .await;

        assert_eq!(outcome.connected, Some(1));
        assert_eq!(dialer.attempts(), vec!["b:2"]);
    }

    #[tokio::test]
    async fn test_sequential_treats_hang_as_failure() {
        let registry = registry(&["a:1"]);

        let outcome = SequentialProbe
            .probe(&BlackHoleDialer, &registry, 0, Duration::from_millis(10))
            .await;

        assert_eq!(outcome.connected, None);
        assert_eq!(outcome.cursor, 1);
    }

    #[tokio::test]
    async fn test_racing_prefers_earlier_entry_within_wave() {
        let dialer = ScriptedDialer::new(&[("a:1", true), ("b:2", true)]);
        let registry = registry(&["a:1", "b:2"]);

        let outcome = RacingProbe::new(2)
            .probe(&dialer, &registry, 0, TIMEOUT)
            .await;

        assert_eq!(outcome.connected, Some(0));
    }

    #[tokio::test]
    async fn test_racing_advances_by_wave() {
        let dialer =
            ScriptedDialer::new(&[("a:1", false), ("b:2", false), ("c:3", true), ("d:4", false)]);
        let registry = registry(&["a:1", "b:2", "c:3", "d:4"]);

        let outcome = RacingProbe::new(2)
            .probe(&dialer, &registry, 0, TIMEOUT)
            .await;

        assert_eq!(outcome.connected, Some(2));
        // The second wave dials c and d; the fourth endpoint may be
        // attempted even though c wins.
        assert!(dialer.attempts().len() >= 3);
    }

    #[tokio::test]
    async fn test_racing_exhaustion() {
        let dialer = ScriptedDialer::new(&[("a:1", false), ("b:2", false), ("c:3", false)]);
        let registry = registry(&["a:1", "b:2", "c:3"]);

        let outcome = RacingProbe::new(2)
            .probe(&dialer, &registry, 0, TIMEOUT)
            .await;

        assert_eq!(outcome.connected, None);
        assert_eq!(outcome.cursor, 3);
    }
}
