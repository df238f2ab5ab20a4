mod menu;
mod server;
mod sessions;
mod transport;

pub use menu::*;
pub use server::*;
pub use sessions::*;
pub use transport::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut issues = Vec::new();

        if self.sessions.warning_threshold_ms >= self.sessions.termination_threshold_ms {
            issues.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "sessions.warning_threshold_ms".into(),
                message: format!(
                    "must be below termination_threshold_ms ({} >= {})",
                    self.sessions.warning_threshold_ms, self.sessions.termination_threshold_ms
                ),
            });
        }

        if self.sessions.sweep_interval_ms == 0 {
            issues.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "sessions.sweep_interval_ms".into(),
                message: "must be greater than zero".into(),
            });
        }

        if self.menu.options.is_empty() {
            issues.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "menu.options".into(),
                message: "at least one menu option is required".into(),
            });
        }

        let mut seen = HashSet::new();
        for opt in &self.menu.options {
            if !seen.insert(opt.key.as_str()) {
                issues.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "menu.options".into(),
                    message: format!("duplicate option key `{}`", opt.key),
                });
            }
        }

        if self.transport.max_reconnect_attempts == 0 {
            issues.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "transport.max_reconnect_attempts".into(),
                message: "retries disabled — the first disconnect becomes fatal".into(),
            });
        }

        if self.transport.typing_delay_ms > 10_000 {
            issues.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "transport.typing_delay_ms".into(),
                message: format!(
                    "{}ms is a very long typing pause — contacts will see multi-second stalls",
                    self.transport.typing_delay_ms
                ),
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let issues = Config::default().validate();
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn inverted_thresholds_are_an_error() {
        let mut cfg = Config::default();
        cfg.sessions.warning_threshold_ms = 600_000;
        cfg.sessions.termination_threshold_ms = 300_000;
        let issues = cfg.validate();
        assert!(issues
            .iter()
            .any(|i| i.severity == ConfigSeverity::Error
                && i.field == "sessions.warning_threshold_ms"));
    }

    #[test]
    fn duplicate_option_keys_are_an_error() {
        let mut cfg = Config::default();
        let dup = cfg.menu.options[0].clone();
        cfg.menu.options.push(dup);
        let issues = cfg.validate();
        assert!(issues
            .iter()
            .any(|i| i.severity == ConfigSeverity::Error && i.message.contains("duplicate")));
    }

    #[test]
    fn zero_retries_is_only_a_warning() {
        let mut cfg = Config::default();
        cfg.transport.max_reconnect_attempts = 0;
        let issues = cfg.validate();
        assert!(issues.iter().all(|i| i.severity == ConfigSeverity::Warning));
        assert_eq!(issues.len(), 1);
    }
}
