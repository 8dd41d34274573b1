use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::admin::AppState;
use crate::connector::ConnectionState;
use crate::relay::PushOutcome;

/// One queued relay submission. The payload is opaque to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayItem {
    pub id: Uuid,
    pub payload: serde_json::Value,
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct RelayDepth {
    pub depth: usize,
}

#[derive(Serialize)]
pub struct PushReceipt {
    pub id: Uuid,
    pub outcome: &'static str,
    pub depth: usize,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn get_connection(State(state): State<AppState>) -> Json<ConnectionState> {
    Json(state.connector.state().snapshot())
}

/// Run a connection cycle and report how it settled.
///
/// Whether a cycle after exhaustion retries from the head of the list
/// is governed by `connector.rewind_on_reconnect`.
pub async fn trigger_connect(State(state): State<AppState>) -> Json<ConnectionState> {
    state.connector.connect().await;
    Json(state.connector.state().snapshot())
}

pub async fn get_relay_depth(State(state): State<AppState>) -> Json<RelayDepth> {
    Json(RelayDepth {
        depth: state.relay.size(),
    })
}

pub async fn push_relay(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let id = Uuid::new_v4();
    let outcome = state.relay.push(RelayItem { id, payload });

    let (status, outcome) = match outcome {
        PushOutcome::Queued => (StatusCode::ACCEPTED, "queued"),
        PushOutcome::EvictedOldest => (StatusCode::ACCEPTED, "queued-evicted-oldest"),
        PushOutcome::Rejected => (StatusCode::SERVICE_UNAVAILABLE, "rejected"),
    };

    (
        status,
        Json(PushReceipt {
            id,
            outcome,
            depth: state.relay.size(),
        }),
    )
        .into_response()
}

/// Drain one item. 204 when the queue is empty.
pub async fn next_relay(State(state): State<AppState>) -> Response {
    match state.relay.next() {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
