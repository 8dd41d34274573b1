//! Admin HTTP surface.
//!
//! # Responsibilities
//! - Expose connection state and relay queue to operators
//! - Provide the explicit re-connect trigger
//! - Require the configured bearer key on every route

pub mod auth;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RelayConfig;
use crate::connector::FailoverConnector;
use crate::relay::SharedRelay;

use self::auth::require_api_key;
use self::handlers::RelayItem;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub connector: Arc<FailoverConnector>,
    pub relay: Arc<SharedRelay<RelayItem>>,
}

/// Build the admin router.
pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(handlers::get_status))
        .route("/admin/connection", get(handlers::get_connection))
        .route("/admin/connect", post(handlers::trigger_connect))
        .route(
            "/admin/relay",
            get(handlers::get_relay_depth).post(handlers::push_relay),
        )
        .route("/admin/relay/next", post(handlers::next_relay))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(30))),
        )
        .with_state(state)
}
