use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Transport connector
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The external connector process that owns the messaging-channel session.
/// The gateway receives its lifecycle events on `POST /v1/transport/events`
/// and pushes commands (`send_text`, `send_typing`, `reconnect`) to
/// `connector_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Base URL of the connector's command endpoint.
    #[serde(default = "d_connector_url")]
    pub connector_url: String,
    /// Per-command HTTP timeout.
    #[serde(default = "d_command_timeout")]
    pub command_timeout_secs: u64,
    /// Reconnect attempts tolerated before the process gives up and exits
    /// for the supervisor to restart it.
    #[serde(default = "d_max_reconnect")]
    pub max_reconnect_attempts: u32,
    /// Fixed delay between a disconnect and the reconnect attempt.
    /// Constant, not exponential: the transport either comes back within a
    /// few intervals or the account needs re-pairing anyway.
    #[serde(default = "d_reconnect_interval")]
    pub reconnect_interval_ms: u64,
    /// Simulated human typing pause before every outbound text.
    #[serde(default = "d_typing_delay")]
    pub typing_delay_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connector_url: d_connector_url(),
            command_timeout_secs: d_command_timeout(),
            max_reconnect_attempts: d_max_reconnect(),
            reconnect_interval_ms: d_reconnect_interval(),
            typing_delay_ms: d_typing_delay(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_connector_url() -> String {
    "http://127.0.0.1:3001".into()
}
fn d_command_timeout() -> u64 {
    30
}
fn d_max_reconnect() -> u32 {
    5
}
fn d_reconnect_interval() -> u64 {
    15_000
}
fn d_typing_delay() -> u64 {
    1_500
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
