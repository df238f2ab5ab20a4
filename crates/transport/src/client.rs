//! Command client — forwards gateway commands to the connector over HTTP.

use std::time::Duration;

use serde::Serialize;

/// Errors surfaced by transport commands.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("connector rejected command: {0}")]
    Rejected(String),
}

/// The operations the gateway may invoke on the connector.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Show a "composing..." indicator to the contact.
    async fn send_typing(&self, contact_id: &str) -> Result<(), TransportError>;

    /// Deliver a text message to the contact.
    async fn send_text(&self, contact_id: &str, body: &str) -> Result<(), TransportError>;

    /// Ask the connector to re-initialize the channel session.
    async fn reconnect(&self) -> Result<(), TransportError>;
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Command<'a> {
    SendTyping { contact_id: &'a str },
    SendText { contact_id: &'a str, body: &'a str },
    Reconnect,
}

/// Production [`Transport`]: POSTs a JSON command envelope to the
/// connector's `/commands` endpoint.
pub struct WebhookTransport {
    client: reqwest::Client,
    commands_url: String,
}

impl WebhookTransport {
    pub fn new(connector_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            commands_url: format!("{}/commands", connector_url.trim_end_matches('/')),
        }
    }

    async fn post(&self, command: &Command<'_>) -> Result<(), TransportError> {
        let resp = self.client.post(&self.commands_url).json(command).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(TransportError::Rejected(format!("{status}: {body}")))
    }
}

#[async_trait::async_trait]
impl Transport for WebhookTransport {
    async fn send_typing(&self, contact_id: &str) -> Result<(), TransportError> {
        self.post(&Command::SendTyping { contact_id }).await
    }

    async fn send_text(&self, contact_id: &str, body: &str) -> Result<(), TransportError> {
        tracing::debug!(contact_id = %contact_id, chars = body.chars().count(), "send_text");
        self.post(&Command::SendText { contact_id, body }).await
    }

    async fn reconnect(&self) -> Result<(), TransportError> {
        self.post(&Command::Reconnect).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_url_normalizes_trailing_slash() {
        let t = WebhookTransport::new("http://127.0.0.1:3001/", Duration::from_secs(1));
        assert_eq!(t.commands_url, "http://127.0.0.1:3001/commands");
    }

    #[test]
    fn command_envelope_serializes_tagged() {
        let json = serde_json::to_value(Command::SendText {
            contact_id: "c1",
            body: "oi",
        })
        .unwrap();
        assert_eq!(json["type"], "send_text");
        assert_eq!(json["contact_id"], "c1");
        assert_eq!(json["body"], "oi");

        let json = serde_json::to_value(Command::Reconnect).unwrap();
        assert_eq!(json["type"], "reconnect");
    }
}
