//! Runtime — the transport event loop and the inbound message handler.

pub mod connection;
pub mod dispatch;
pub mod responder;
pub mod sweeper;

use chrono::Timelike;
use tokio::sync::mpsc;

use atende_transport::TransportEvent;

use crate::state::AppState;
use dispatch::{dispatch, Reply};

/// Drain connector events until the channel closes.
///
/// Events are handled to completion before the next one is drawn, so
/// messages from a single contact are processed in arrival order.
pub async fn run_event_loop(state: AppState, mut events_rx: mpsc::Receiver<TransportEvent>) {
    while let Some(event) = events_rx.recv().await {
        match event {
            TransportEvent::PairingChallenge { artifact_png } => {
                state.connection.on_pairing_challenge(&artifact_png).await;
            }
            TransportEvent::Authenticated => state.connection.on_authenticated(),
            TransportEvent::Ready => state.connection.on_ready(),
            TransportEvent::Disconnected { reason } => state.connection.on_disconnected(&reason),
            TransportEvent::Message {
                contact_id,
                sender_name,
                body,
            } => {
                handle_message(&state, &contact_id, sender_name.as_deref(), &body).await;
            }
        }
    }
    tracing::info!("transport event channel closed");
}

/// Handle one inbound message: gate on channel readiness, refresh the
/// session, run the dispatcher, reply through the responder.
pub async fn handle_message(
    state: &AppState,
    contact_id: &str,
    sender_name: Option<&str>,
    body: &str,
) {
    if !state.connection.is_ready() {
        tracing::debug!(contact_id = %contact_id, "message ignored — channel not ready");
        return;
    }

    let session = state.sessions.touch(contact_id);
    let name = sender_name.unwrap_or("Cliente");
    let hour = chrono::Local::now().hour();
    tracing::info!(contact_id = %contact_id, name = %name, "inbound message");

    let Some(reply) = dispatch(&state.config.menu, body, hour, name, session.ticket) else {
        return;
    };
    if matches!(reply, Reply::Menu(_)) {
        state.sessions.mark_initiated(contact_id);
    }
    state.responder.send(contact_id, reply.text()).await;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ready_state, test_state};

    #[tokio::test]
    async fn messages_ignored_until_channel_ready() {
        let (state, _rx, transport) = test_state();

        handle_message(&state, "c1", Some("Ana"), "menu").await;

        assert!(transport.calls().is_empty());
        assert!(state.sessions.is_empty(), "no session for a dropped message");
    }

    #[tokio::test]
    async fn canned_option_is_replied_with_typing_first() {
        let (state, _rx, transport) = ready_state();

        handle_message(&state, "c1", Some("Ana"), "3").await;

        let texts = transport.texts_to("c1");
        assert_eq!(texts, ["💼 Envie seu currículo para: rh@empresa.com"]);
    }

    #[tokio::test]
    async fn unknown_number_gets_the_invalid_reply() {
        let (state, _rx, transport) = ready_state();

        handle_message(&state, "c1", Some("Ana"), "9").await;

        let texts = transport.texts_to("c1");
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("Opção inválida"));
    }

    #[tokio::test]
    async fn menu_trigger_marks_the_session_initiated() {
        let (state, _rx, transport) = ready_state();

        handle_message(&state, "c1", Some("Ana"), "menu").await;

        let session = state.sessions.get("c1").unwrap();
        assert!(session.contact_initiated);
        let texts = transport.texts_to("c1");
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("*[5]*"));
    }

    #[tokio::test]
    async fn free_text_touches_the_session_but_stays_silent() {
        let (state, _rx, transport) = ready_state();

        handle_message(&state, "c1", None, "tudo bem?").await;

        assert!(state.sessions.get("c1").is_some());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn event_loop_routes_lifecycle_events() {
        let (state, events_rx, transport) = test_state();

        let tx = state.events_tx.clone();
        let loop_handle = tokio::spawn(run_event_loop(state.clone(), events_rx));

        tx.send(TransportEvent::Authenticated).await.unwrap();
        tx.send(TransportEvent::Ready).await.unwrap();
        tx.send(TransportEvent::Message {
            contact_id: "c1".into(),
            sender_name: Some("Ana".into()),
            body: "2".into(),
        })
        .await
        .unwrap();

        // The loop itself holds a sender (state.events_tx), so it never
        // drains to completion — wait for the side effect and stop it.
        let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(1);
        while transport.texts_to("c1").is_empty() {
            assert!(
                tokio::time::Instant::now() < deadline,
                "event loop did not process the message in time"
            );
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        loop_handle.abort();

        assert!(state.connection.is_ready());
        assert_eq!(
            transport.texts_to("c1"),
            ["💰 Envie seu CPF/CNPJ para consulta financeira."]
        );
    }
}
