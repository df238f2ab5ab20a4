use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use atende_domain::config::Config;
use atende_sessions::SessionStore;
use atende_transport::TransportEvent;

use crate::runtime::connection::ConnectionSupervisor;
use crate::runtime::responder::Responder;

/// Shared application state passed to all API handlers and background tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Per-contact conversational state.
    pub sessions: Arc<SessionStore>,
    /// Channel lifecycle state machine + reconnect policy.
    pub connection: Arc<ConnectionSupervisor>,
    /// Outbound sends with the simulated typing pause.
    pub responder: Arc<Responder>,
    /// Producer side of the connector event queue (consumed by the event loop).
    pub events_tx: mpsc::Sender<TransportEvent>,
    pub started_at: Instant,
}
