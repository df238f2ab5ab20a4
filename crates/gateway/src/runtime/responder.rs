//! Outbound responder — typing indicator, a human-feeling pause, then the
//! text. The pause is product behavior (instant replies read as a bot and
//! trip spam heuristics), not a performance artifact.

use std::sync::Arc;
use std::time::Duration;

use atende_transport::{Transport, TransportError};

pub struct Responder {
    transport: Arc<dyn Transport>,
    typing_delay: Duration,
}

impl Responder {
    pub fn new(transport: Arc<dyn Transport>, typing_delay: Duration) -> Self {
        Self {
            transport,
            typing_delay,
        }
    }

    /// Send `text` to `contact_id`. Failures are logged and swallowed: a
    /// missed reply is accepted degradation, and no resend is attempted so
    /// a partial failure can't produce duplicates.
    pub async fn send(&self, contact_id: &str, text: &str) {
        if let Err(e) = self.try_send(contact_id, text).await {
            tracing::warn!(contact_id = %contact_id, error = %e, "outbound send failed");
        }
    }

    async fn try_send(&self, contact_id: &str, text: &str) -> Result<(), TransportError> {
        self.transport.send_typing(contact_id).await?;
        tokio::time::sleep(self.typing_delay).await;
        self.transport.send_text(contact_id, text).await
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockCall, MockTransport};
    use std::time::Instant;

    #[tokio::test]
    async fn typing_precedes_text() {
        let transport = Arc::new(MockTransport::default());
        let responder = Responder::new(transport.clone(), Duration::from_millis(1));

        responder.send("c1", "oi").await;

        let calls = transport.calls();
        assert_eq!(
            calls,
            vec![
                MockCall::Typing("c1".into()),
                MockCall::Text("c1".into(), "oi".into()),
            ]
        );
    }

    #[tokio::test]
    async fn send_waits_at_least_the_typing_delay() {
        let transport = Arc::new(MockTransport::default());
        let responder = Responder::new(transport, Duration::from_millis(30));

        let start = Instant::now();
        responder.send("c1", "oi").await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn transport_failure_is_swallowed() {
        let transport = Arc::new(MockTransport::failing());
        let responder = Responder::new(transport.clone(), Duration::from_millis(1));

        // Must not panic or propagate.
        responder.send("c1", "oi").await;
        assert!(transport.texts_to("c1").is_empty());
    }
}
