//! Transport contract: the event envelope the external connector posts to
//! the gateway, and the command surface the gateway invokes on it.
//!
//! The connector is the process that actually drives the messaging channel
//! (browser-automation client, QR pairing, and so on). The gateway never
//! talks to the channel directly — it consumes `TransportEvent`s and issues
//! `Transport` commands.

mod client;
mod event;

pub use client::{Transport, TransportError, WebhookTransport};
pub use event::TransportEvent;
