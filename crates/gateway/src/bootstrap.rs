//! AppState construction and background-task spawning extracted from
//! `main.rs`, so tests and future CLI one-shots can boot the runtime
//! without an HTTP listener.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use atende_domain::config::{Config, ConfigSeverity};
use atende_sessions::{IdlePolicy, SessionStore};
use atende_transport::{TransportEvent, WebhookTransport};

use crate::runtime::connection::{ConnectionSupervisor, RetryPolicy};
use crate::runtime::responder::Responder;
use crate::state::AppState;

/// Queue depth for connector events. Handling is serialized, so a burst
/// beyond this backpressures to `503` at the ingest endpoint.
const EVENT_QUEUE_DEPTH: usize = 256;

/// Validate config and wire every subsystem into an [`AppState`].
///
/// Returns the state plus the consumer side of the event queue, which
/// [`spawn_background_tasks`] hands to the event loop.
pub fn build_app_state(
    config: Arc<Config>,
) -> anyhow::Result<(AppState, mpsc::Receiver<TransportEvent>)> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    let errors = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("config validation failed with {errors} error(s)");
    }

    // ── Connector command client ─────────────────────────────────────
    let transport = Arc::new(WebhookTransport::new(
        &config.transport.connector_url,
        Duration::from_secs(config.transport.command_timeout_secs),
    ));
    tracing::info!(url = %config.transport.connector_url, "connector command client ready");

    // ── Connection supervisor ────────────────────────────────────────
    let connection = Arc::new(ConnectionSupervisor::new(
        transport.clone(),
        RetryPolicy {
            max_attempts: config.transport.max_reconnect_attempts,
            interval: Duration::from_millis(config.transport.reconnect_interval_ms),
        },
        config.server.pairing_artifact_path.clone(),
    ));
    tracing::info!(
        max_attempts = config.transport.max_reconnect_attempts,
        interval_ms = config.transport.reconnect_interval_ms,
        "connection supervisor ready"
    );

    // ── Sessions ─────────────────────────────────────────────────────
    let sessions = Arc::new(SessionStore::new());
    tracing::info!(
        warning_ms = config.sessions.warning_threshold_ms,
        termination_ms = config.sessions.termination_threshold_ms,
        "session store ready"
    );

    // ── Outbound responder ───────────────────────────────────────────
    let responder = Arc::new(Responder::new(
        transport,
        Duration::from_millis(config.transport.typing_delay_ms),
    ));

    let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);

    let state = AppState {
        config,
        sessions,
        connection,
        responder,
        events_tx,
        started_at: Instant::now(),
    };
    Ok((state, events_rx))
}

/// Spawn the long-running background tasks (transport event loop + idle
/// sweep). Call this **after** [`build_app_state`] when running the server.
pub fn spawn_background_tasks(state: &AppState, events_rx: mpsc::Receiver<TransportEvent>) {
    // ── Transport event loop ─────────────────────────────────────────
    {
        let state = state.clone();
        tokio::spawn(async move {
            crate::runtime::run_event_loop(state, events_rx).await;
        });
    }

    // ── Idle sweep ───────────────────────────────────────────────────
    {
        let state = state.clone();
        let policy = IdlePolicy::from_config(&state.config.sessions);
        let period = Duration::from_millis(state.config.sessions.sweep_interval_ms);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately; skip it so a fresh
            // boot doesn't sweep straight away.
            interval.tick().await;
            loop {
                interval.tick().await;
                crate::runtime::sweeper::tick(&state, &policy).await;
            }
        });
    }

    tracing::info!("background tasks spawned");
}
