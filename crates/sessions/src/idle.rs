//! Idle classification — pure decision logic behind the sweep.
//!
//! Termination is evaluated before warning, so a session that crossed both
//! thresholds in one sweep tick is closed outright instead of being warned
//! first and closed a tick later.

use chrono::{DateTime, Duration, Utc};

use atende_domain::config::SessionsConfig;

/// What the sweep should do with a session right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleState {
    /// Recently active, or already warned and not yet expired.
    Active,
    /// Crossed the warning threshold and has not been warned yet.
    WarnDue,
    /// Crossed the termination threshold.
    TerminateDue,
}

/// Idle thresholds resolved from configuration.
#[derive(Debug, Clone)]
pub struct IdlePolicy {
    pub warning_after: Duration,
    pub termination_after: Duration,
}

impl IdlePolicy {
    pub fn from_config(config: &SessionsConfig) -> Self {
        Self {
            warning_after: Duration::milliseconds(config.warning_threshold_ms as i64),
            termination_after: Duration::milliseconds(config.termination_threshold_ms as i64),
        }
    }

    /// Classify a session given its last activity and warned flag.
    pub fn classify(
        &self,
        last_activity_at: DateTime<Utc>,
        warned: bool,
        now: DateTime<Utc>,
    ) -> IdleState {
        let idle = now.signed_duration_since(last_activity_at);

        if idle >= self.termination_after {
            return IdleState::TerminateDue;
        }
        if idle >= self.warning_after && !warned {
            return IdleState::WarnDue;
        }
        IdleState::Active
    }
}
