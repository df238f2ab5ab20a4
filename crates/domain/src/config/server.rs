use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Server
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Operator-facing HTTP surface. Read-only, unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind port. Overridable with the `ATENDE_PORT` environment variable.
    #[serde(default = "d_port")]
    pub port: u16,
    #[serde(default = "d_host")]
    pub host: String,
    /// Where the pairing artifact (QR code PNG) received from the connector
    /// is persisted, and what `GET /qrcode` serves.
    #[serde(default = "d_artifact_path")]
    pub pairing_artifact_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: d_port(),
            host: d_host(),
            pairing_artifact_path: d_artifact_path(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_port() -> u16 {
    10000
}
fn d_host() -> String {
    "0.0.0.0".into()
}
fn d_artifact_path() -> PathBuf {
    PathBuf::from("public/qrcode.png")
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_empty_toml_uses_all_defaults() {
        let cfg: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.port, 10000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.pairing_artifact_path, PathBuf::from("public/qrcode.png"));
    }

    #[test]
    fn server_config_parses_overrides() {
        let toml_str = r#"
            port = 8080
            host = "127.0.0.1"
            pairing_artifact_path = "/var/lib/atende/qr.png"
        "#;
        let cfg: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(
            cfg.pairing_artifact_path,
            PathBuf::from("/var/lib/atende/qr.png")
        );
    }
}
