//! Relay Gateway (v1)
//!
//! A small gateway around two primitives: an endpoint failover connector
//! and a head-priority relay queue.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌─────────────────────────────────────────────┐
//!                 │                RELAY GATEWAY                 │
//!                 │                                              │
//!   Operator      │  ┌─────────┐      ┌───────────────────────┐ │
//!   ──────────────┼─▶│  admin  │─────▶│  connector            │ │
//!   (HTTP + key)  │  │ router  │      │  cursor walk over the │ │
//!                 │  └────┬────┘      │  ordered endpoint list│─┼──▶ Endpoints
//!                 │       │           └──────────┬────────────┘ │
//!                 │       │                      ▼              │
//!                 │       │           ┌───────────────────────┐ │
//!                 │       └──────────▶│  relay queue          │ │
//!                 │                   │  newest item first    │ │
//!                 │                   └───────────────────────┘ │
//!                 │                                              │
//!                 │  ┌────────────────────────────────────────┐ │
//!                 │  │          Cross-Cutting Concerns         │ │
//!                 │  │  config · observability · lifecycle     │ │
//!                 │  └────────────────────────────────────────┘ │
//!                 └─────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod config;
pub mod connector;
pub mod lifecycle;
pub mod observability;
pub mod relay;

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::admin::AppState;
use crate::config::RelayConfig;
use crate::connector::{EndpointRegistry, FailoverConnector};
use crate::lifecycle::Shutdown;
use crate::relay::{RelayQueue, SharedRelay};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    tracing::info!("relay-gateway v0.1.0 starting");

    let config = match std::env::args().nth(1) {
        Some(path) => config::loader::load_config(Path::new(&path))?,
        None => RelayConfig::default(),
    };

    tracing::info!(
        endpoints = config.connector.endpoints.len(),
        connect_timeout_ms = config.connector.connect_timeout_ms,
        bind_address = %config.listener.bind_address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let registry = EndpointRegistry::from_addresses(&config.connector.endpoints);
    let connector = Arc::new(FailoverConnector::new(registry, &config.connector));

    // First connection cycle settles before traffic is accepted.
    connector.connect().await;

    let relay = Arc::new(SharedRelay::new(RelayQueue::from_config(&config.relay)));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Admin server listening"
    );

    let state = AppState {
        config: Arc::new(config),
        connector,
        relay,
    };
    let router = admin::admin_router(state);

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        lifecycle::signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
