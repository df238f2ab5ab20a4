//! Test doubles and state builders shared by the gateway unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::mpsc;

use atende_domain::config::Config;
use atende_sessions::SessionStore;
use atende_transport::{Transport, TransportError, TransportEvent};

use crate::runtime::connection::{ConnectionSupervisor, RetryPolicy};
use crate::runtime::responder::Responder;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Typing(String),
    Text(String, String),
    Reconnect,
}

/// Records every command; optionally fails them all.
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<MockCall>>,
    fail: AtomicBool,
}

impl MockTransport {
    pub fn failing() -> Self {
        let transport = Self::default();
        transport.fail.store(true, Ordering::SeqCst);
        transport
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    pub fn texts_to(&self, contact_id: &str) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                MockCall::Text(to, text) if to == contact_id => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn reconnect_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, MockCall::Reconnect))
            .count()
    }

    fn record(&self, call: MockCall) -> Result<(), TransportError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected("mock transport failure".into()));
        }
        self.calls.lock().push(call);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send_typing(&self, contact_id: &str) -> Result<(), TransportError> {
        self.record(MockCall::Typing(contact_id.into()))
    }

    async fn send_text(&self, contact_id: &str, body: &str) -> Result<(), TransportError> {
        self.record(MockCall::Text(contact_id.into(), body.into()))
    }

    async fn reconnect(&self) -> Result<(), TransportError> {
        self.record(MockCall::Reconnect)
    }
}

/// Build an [`AppState`] over a mock transport with a 1ms typing delay.
/// The supervisor starts `Disconnected`.
pub fn test_state() -> (AppState, mpsc::Receiver<TransportEvent>, Arc<MockTransport>) {
    test_state_with(Config::default())
}

pub fn test_state_with(
    config: Config,
) -> (AppState, mpsc::Receiver<TransportEvent>, Arc<MockTransport>) {
    let config = Arc::new(config);
    let transport = Arc::new(MockTransport::default());
    let connection = Arc::new(ConnectionSupervisor::new(
        transport.clone(),
        RetryPolicy {
            max_attempts: config.transport.max_reconnect_attempts,
            interval: Duration::from_millis(20),
        },
        config.server.pairing_artifact_path.clone(),
    ));
    let responder = Arc::new(Responder::new(transport.clone(), Duration::from_millis(1)));
    let (events_tx, events_rx) = mpsc::channel(16);

    let state = AppState {
        config,
        sessions: Arc::new(SessionStore::new()),
        connection,
        responder,
        events_tx,
        started_at: Instant::now(),
    };
    (state, events_rx, transport)
}

/// [`test_state`] with the channel already `Ready`.
pub fn ready_state() -> (AppState, mpsc::Receiver<TransportEvent>, Arc<MockTransport>) {
    let (state, events_rx, transport) = test_state();
    state.connection.on_authenticated();
    state.connection.on_ready();
    (state, events_rx, transport)
}
