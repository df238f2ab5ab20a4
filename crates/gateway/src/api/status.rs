//! Liveness and status endpoints.

use axum::extract::State;
use axum::response::{IntoResponse, Json};
use serde::Serialize;

use crate::runtime::connection::ConnectionState;
use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET / and GET /health
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn index() -> &'static str {
    "🤖 atende online! O artefato de pareamento está em /qrcode."
}

pub async fn health() -> &'static str {
    "OK"
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /v1/status
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Serialize)]
struct StatusResponse {
    /// `"online"` only while the channel is fully ready.
    status: &'static str,
    connection: ConnectionState,
    retry_count: u32,
    uptime_secs: u64,
    active_sessions: usize,
}

pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let connection = state.connection.state();
    let status = if connection == ConnectionState::Ready {
        "online"
    } else {
        "offline"
    };

    Json(StatusResponse {
        status,
        connection,
        retry_count: state.connection.retry_count(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        active_sessions: state.sessions.len(),
    })
}
