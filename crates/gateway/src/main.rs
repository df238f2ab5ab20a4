use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use atende_domain::config::Config;
use atende_gateway::cli::{Cli, Command, ConfigCommand};
use atende_gateway::runtime::connection::ConnectionState;
use atende_gateway::state::AppState;
use atende_gateway::{api, bootstrap, cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    match args.command {
        // Default to serve when no subcommand is given.
        None | Some(Command::Serve) => {
            init_tracing();
            let config = cli::load_config(&args.config)?;
            run_server(Arc::new(config)).await
        }
        Some(Command::Config(ConfigCommand::Validate)) => {
            init_cli_tracing();
            let config = cli::load_config(&args.config)?;
            if !cli::validate(&config, &args.config) {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::Config(ConfigCommand::Show)) => {
            init_cli_tracing();
            let config = cli::load_config(&args.config)?;
            cli::show(&config);
            Ok(())
        }
        Some(Command::Version) => {
            println!("atende {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Initialize structured JSON tracing (only for the `serve` command).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,atende_gateway=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// Compact stderr-only tracing for CLI one-shot commands, so diagnostic
/// output does not pollute stdout.
fn init_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Start the gateway with the given configuration.
async fn run_server(config: Arc<Config>) -> anyhow::Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "atende starting");

    // ── Build shared state & spawn background loops ──────────────────
    let (state, events_rx) = bootstrap::build_app_state(config.clone())?;
    bootstrap::spawn_background_tasks(&state, events_rx);

    // ── Router ───────────────────────────────────────────────────────
    let app = api::router()
        .layer(tower::limit::ConcurrencyLimitLayer::new(64))
        .with_state(state.clone());

    // ── Bind ─────────────────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;
    tracing::info!(addr = %addr, "atende listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.clone()))
        .await
        .context("axum server error")?;

    // A failed supervisor means the retry ceiling was exhausted: exit
    // non-zero so the process manager restarts us with a fresh transport.
    if state.connection.state() == ConnectionState::Failed {
        anyhow::bail!(
            "transport reconnect attempts exhausted after {} disconnects",
            state.connection.retry_count()
        );
    }

    tracing::info!("shutdown complete");
    Ok(())
}

/// Wait for SIGINT, SIGTERM, or a permanent transport failure, then return
/// to trigger graceful shutdown of the Axum server.
async fn shutdown_signal(state: AppState) {
    let ctrl_c = tokio::signal::ctrl_c();
    let fatal = state.connection.fatal().notified();

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to register SIGTERM handler");

        tokio::select! {
            _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
            _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down"),
            _ = fatal => tracing::error!("transport failed permanently, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
            _ = fatal => tracing::error!("transport failed permanently, shutting down"),
        }
    }
}
