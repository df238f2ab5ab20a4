//! Connection supervisor — owns the channel lifecycle state machine and
//! drives bounded-retry reconnection.
//!
//! The transport is inherently flaky (the remote party or resource
//! exhaustion can kill the connector's browser session at any time).
//! Transient drops are retried on a fixed interval; once the retry ceiling
//! is exceeded the supervisor goes `Failed` and signals the process to exit
//! non-zero so the surrounding process manager can restart it.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use atende_domain::{Error, Result};
use atende_transport::Transport;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Connection state & retry policy
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    AwaitingPairing,
    Authenticated,
    /// The only state in which inbound messages are processed.
    Ready,
    /// Terminal: retry ceiling exhausted.
    Failed,
}

/// Fixed-interval, bounded reconnect policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Consecutive disconnects tolerated before giving up.
    pub max_attempts: u32,
    /// Constant delay before each reconnect attempt.
    pub interval: Duration,
}

impl RetryPolicy {
    /// Whether the given disconnect count exceeds the ceiling.
    pub fn should_give_up(&self, attempt: u32) -> bool {
        attempt > self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.interval
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ConnectionSupervisor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct ConnectionSupervisor {
    state: RwLock<ConnectionState>,
    retry_count: AtomicU32,
    policy: RetryPolicy,
    transport: Arc<dyn Transport>,
    /// Where the pairing artifact PNG is persisted for `GET /qrcode`.
    artifact_path: PathBuf,
    /// At most one armed reconnect timer; cancelled on authentication.
    /// Shared with the timer task so it can clear its own slot.
    pending_reconnect: Arc<Mutex<Option<CancellationToken>>>,
    /// Signalled once when the supervisor goes `Failed`.
    fatal: Notify,
}

impl ConnectionSupervisor {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy, artifact_path: PathBuf) -> Self {
        Self {
            state: RwLock::new(ConnectionState::Disconnected),
            retry_count: AtomicU32::new(0),
            policy,
            transport,
            artifact_path,
            pending_reconnect: Arc::new(Mutex::new(None)),
            fatal: Notify::new(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ConnectionState::Ready
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count.load(Ordering::SeqCst)
    }

    /// Completes once the supervisor has failed permanently.
    pub fn fatal(&self) -> &Notify {
        &self.fatal
    }

    /// A pairing challenge was issued. Ignored while authenticated — the
    /// transport re-emits challenges on some reconnect paths and a paired
    /// account must not be re-prompted.
    pub async fn on_pairing_challenge(&self, artifact_png_b64: &str) {
        let current = self.state();
        if matches!(
            current,
            ConnectionState::Authenticated | ConnectionState::Ready
        ) {
            tracing::debug!(state = ?current, "pairing challenge ignored — already authenticated");
            return;
        }
        *self.state.write() = ConnectionState::AwaitingPairing;

        match self.persist_artifact(artifact_png_b64).await {
            Ok(bytes) => tracing::info!(
                path = %self.artifact_path.display(),
                bytes,
                "pairing artifact updated — scan it at /qrcode"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to persist pairing artifact"),
        }
    }

    /// Decode and write the artifact PNG. Returns the byte count.
    async fn persist_artifact(&self, artifact_png_b64: &str) -> Result<usize> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(artifact_png_b64)
            .map_err(|e| Error::Other(format!("artifact is not valid base64: {e}")))?;
        if let Some(parent) = self.artifact_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(Error::Io)?;
        }
        tokio::fs::write(&self.artifact_path, &bytes)
            .await
            .map_err(Error::Io)?;
        Ok(bytes.len())
    }

    /// Pairing accepted: reset the retry counter and drop any armed timer —
    /// the channel recovered out of band, a stale reconnect would tear it
    /// down again.
    pub fn on_authenticated(&self) {
        *self.state.write() = ConnectionState::Authenticated;
        self.retry_count.store(0, Ordering::SeqCst);
        self.cancel_pending_reconnect();
        tracing::info!("channel authenticated");
    }

    pub fn on_ready(&self) {
        *self.state.write() = ConnectionState::Ready;
        tracing::info!("channel ready — inbound processing enabled");
    }

    /// The channel dropped. Count it and either arm a reconnect timer or,
    /// past the ceiling, fail permanently.
    pub fn on_disconnected(&self, reason: &str) {
        let attempt = self.retry_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.policy.should_give_up(attempt) {
            *self.state.write() = ConnectionState::Failed;
            tracing::error!(
                reason = %reason,
                attempts = attempt - 1,
                "reconnect attempts exhausted — giving up"
            );
            self.fatal.notify_one();
            return;
        }

        *self.state.write() = ConnectionState::Disconnected;
        tracing::warn!(reason = %reason, attempt, "channel disconnected");
        self.schedule_reconnect();
    }

    /// Arm the reconnect timer unless one is already pending.
    fn schedule_reconnect(&self) {
        let mut pending = self.pending_reconnect.lock();
        if pending.is_some() {
            tracing::debug!("reconnect already scheduled");
            return;
        }
        let token = CancellationToken::new();
        *pending = Some(token.clone());
        drop(pending);

        let transport = self.transport.clone();
        let slot = self.pending_reconnect.clone();
        let delay = self.policy.delay();
        let attempt = self.retry_count();
        tokio::spawn(async move {
            tokio::select! {
                // Whoever cancelled also cleared the slot.
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            slot.lock().take();
            tracing::info!(attempt, "attempting transport reconnect");
            if let Err(e) = transport.reconnect().await {
                tracing::warn!(error = %e, "reconnect command failed");
            }
        });
    }

    fn cancel_pending_reconnect(&self) {
        if let Some(token) = self.pending_reconnect.lock().take() {
            token.cancel();
            tracing::debug!("pending reconnect cancelled");
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
