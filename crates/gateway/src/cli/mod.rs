use clap::{Parser, Subcommand};

use atende_domain::config::{Config, ConfigSeverity};

/// atende — automated customer-service front-end for a messaging channel.
#[derive(Debug, Parser)]
#[command(name = "atende", version, about)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the gateway (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any issues.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from `path`, falling back to defaults when the
/// file does not exist. Hosted deploys set the bind port through the
/// `ATENDE_PORT` environment variable, which wins over the file.
pub fn load_config(path: &str) -> anyhow::Result<Config> {
    let mut config: Config = if std::path::Path::new(path).exists() {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {path}: {e}"))?
    } else {
        tracing::warn!(path = %path, "config file not found — using defaults");
        Config::default()
    };

    if let Ok(port) = std::env::var("ATENDE_PORT") {
        config.server.port = port
            .parse()
            .map_err(|e| anyhow::anyhow!("ATENDE_PORT `{port}` is not a port number: {e}"))?;
    }

    Ok(config)
}

/// `config validate` — print every issue; returns `false` when any is an
/// error.
pub fn validate(config: &Config, path: &str) -> bool {
    let issues = config.validate();
    if issues.is_empty() {
        println!("{path}: OK");
        return true;
    }
    for issue in &issues {
        println!("{issue}");
    }
    !issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error)
}

/// `config show` — dump the resolved configuration as TOML.
pub fn show(config: &Config) {
    match toml::to_string_pretty(config) {
        Ok(doc) => println!("{doc}"),
        Err(e) => eprintln!("failed to render config: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config("/definitely/not/a/real/config.toml").unwrap();
        assert_eq!(config.transport.max_reconnect_attempts, 5);
    }

    #[test]
    fn file_contents_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 4242\n").unwrap();

        let config = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 4242);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = oops").unwrap();

        assert!(load_config(path.to_str().unwrap()).is_err());
    }
}
