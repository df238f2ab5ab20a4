//! Connector event sink — the single entry point for transport lifecycle
//! and message events.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use atende_transport::TransportEvent;

use crate::state::AppState;

/// `POST /v1/transport/events` — enqueue one event for the event loop.
///
/// Fire-and-forget: the connector gets a `202` as soon as the event is
/// queued and must not block on processing. A full queue answers `503` so
/// the connector backs off instead of piling up requests here.
pub async fn ingest(
    State(state): State<AppState>,
    Json(event): Json<TransportEvent>,
) -> Response {
    match state.events_tx.try_send(event) {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "transport event dropped — queue unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "error": "event queue unavailable" })),
            )
                .into_response()
        }
    }
}
