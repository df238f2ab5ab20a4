//! Pairing artifact endpoint.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};

use crate::state::AppState;

/// `GET /qrcode` — the latest pairing artifact as PNG.
///
/// 404 until the connector has posted a pairing challenge (or after the
/// operator cleaned the artifact directory).
pub async fn artifact(State(state): State<AppState>) -> Response {
    let path = &state.config.server.pairing_artifact_path;
    match tokio::fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "no pairing challenge received yet" })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "pairing artifact unreadable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "pairing artifact unreadable" })),
            )
                .into_response()
        }
    }
}
