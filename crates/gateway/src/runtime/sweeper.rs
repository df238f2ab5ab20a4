//! Idle sweep — warns inactive contacts once, then closes the conversation
//! and reclaims the session.

use chrono::Utc;

use atende_sessions::IdlePolicy;

use crate::state::AppState;

/// One sweep pass. Notices go out through the responder with the usual
/// typing pause. Skipped entirely while the channel is unusable — the
/// notices could not be delivered, and sessions still expire on the next
/// usable sweep.
pub async fn tick(state: &AppState, policy: &IdlePolicy) {
    if !state.connection.is_ready() {
        return;
    }

    let outcome = state.sessions.sweep(Utc::now(), policy);

    for contact_id in &outcome.warnings {
        state
            .responder
            .send(contact_id, &state.config.sessions.warning_message)
            .await;
    }
    for contact_id in &outcome.terminations {
        state
            .responder
            .send(contact_id, &state.config.sessions.termination_message)
            .await;
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
