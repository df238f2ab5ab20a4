pub mod events;
pub mod pairing;
pub mod status;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the operator-facing router.
///
/// Everything here is either read-only or the connector's event sink; the
/// surface carries no authentication and is meant to sit on a trusted
/// network or behind the platform's ingress.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(status::index))
        .route("/health", get(status::health))
        .route("/qrcode", get(pairing::artifact))
        .route("/v1/status", get(status::status))
        .route("/v1/transport/events", post(events::ingest))
        .layer(TraceLayer::new_for_http())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
