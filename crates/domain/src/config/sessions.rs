use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Sessions & idle lifecycle
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Idle-conversation lifecycle rules. A contact idle past
/// `warning_threshold_ms` is warned once; idle past
/// `termination_threshold_ms` the conversation is closed and the session
/// record reclaimed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    #[serde(default = "d_warning_threshold")]
    pub warning_threshold_ms: u64,
    #[serde(default = "d_termination_threshold")]
    pub termination_threshold_ms: u64,
    /// How often the idle sweep runs.
    #[serde(default = "d_sweep_interval")]
    pub sweep_interval_ms: u64,
    /// Sent when a contact crosses the warning threshold.
    #[serde(default = "d_warning_message")]
    pub warning_message: String,
    /// Sent when a contact crosses the termination threshold.
    #[serde(default = "d_termination_message")]
    pub termination_message: String,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            warning_threshold_ms: d_warning_threshold(),
            termination_threshold_ms: d_termination_threshold(),
            sweep_interval_ms: d_sweep_interval(),
            warning_message: d_warning_message(),
            termination_message: d_termination_message(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_warning_threshold() -> u64 {
    300_000 // 5 minutes
}
fn d_termination_threshold() -> u64 {
    600_000 // 10 minutes
}
fn d_sweep_interval() -> u64 {
    60_000
}
fn d_warning_message() -> String {
    "⏳ Você ainda está aí? Este atendimento será encerrado em breve por inatividade.".into()
}
fn d_termination_message() -> String {
    "✅ Atendimento encerrado por inatividade. Digite MENU para recomeçar.".into()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_config_empty_toml_uses_all_defaults() {
        let cfg: SessionsConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.warning_threshold_ms, 300_000);
        assert_eq!(cfg.termination_threshold_ms, 600_000);
        assert_eq!(cfg.sweep_interval_ms, 60_000);
        assert!(!cfg.warning_message.is_empty());
        assert!(!cfg.termination_message.is_empty());
    }

    #[test]
    fn sessions_config_parses_thresholds() {
        let toml_str = r#"
            warning_threshold_ms = 120000
            termination_threshold_ms = 240000
            warning_message = "still there?"
        "#;
        let cfg: SessionsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.warning_threshold_ms, 120_000);
        assert_eq!(cfg.termination_threshold_ms, 240_000);
        assert_eq!(cfg.warning_message, "still there?");
    }
}
