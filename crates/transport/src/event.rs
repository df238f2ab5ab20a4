use serde::{Deserialize, Serialize};

/// Lifecycle and message events posted by the connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportEvent {
    /// A pairing challenge was issued by the remote channel. The connector
    /// renders the scannable artifact and ships it as base64 PNG bytes.
    PairingChallenge { artifact_png: String },

    /// The channel accepted the pairing credentials.
    Authenticated,

    /// The channel is fully synchronized and messages will flow.
    Ready,

    /// The channel dropped. `reason` is the connector's own wording
    /// ("logout", "navigation", resource exhaustion, ...).
    Disconnected { reason: String },

    /// An inbound message from a contact.
    Message {
        /// Stable address of the contact (phone-like id).
        contact_id: String,
        /// Display name, when the channel exposes one.
        #[serde(default)]
        sender_name: Option<String>,
        body: String,
    },
}
