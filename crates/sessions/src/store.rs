//! In-memory session store keyed by contact address.
//!
//! Sessions are created lazily on the first inbound message from a contact,
//! refreshed on every message, and deleted only by the sweep. The map is
//! shared between the message-handling path and the sweep task, so access
//! goes through an `RwLock`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rand::Rng;

use crate::idle::{IdlePolicy, IdleState};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A single contact's conversational state.
#[derive(Debug, Clone)]
pub struct Session {
    pub contact_id: String,
    pub last_activity_at: DateTime<Utc>,
    /// An idle warning went out and no activity has happened since.
    pub warned: bool,
    /// The contact opened the menu at least once this session.
    pub contact_initiated: bool,
    /// Service-ticket number minted when the session is created; embedded
    /// in the talk-to-an-agent reply.
    pub ticket: u32,
}

/// Contacts touched by one sweep pass.
#[derive(Debug, Default)]
pub struct SweepOutcome {
    pub warnings: Vec<String>,
    pub terminations: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record activity for `contact_id`: create the session if absent,
    /// otherwise refresh `last_activity_at` and clear the warned flag.
    /// Returns a snapshot of the session after the update.
    pub fn touch(&self, contact_id: &str) -> Session {
        self.touch_at(contact_id, Utc::now())
    }

    /// [`touch`](Self::touch) with an explicit clock, for tests and replay.
    pub fn touch_at(&self, contact_id: &str, now: DateTime<Utc>) -> Session {
        let mut sessions = self.sessions.write();
        let entry = sessions
            .entry(contact_id.to_owned())
            .and_modify(|s| {
                s.last_activity_at = now;
                s.warned = false;
            })
            .or_insert_with(|| {
                let session = Session {
                    contact_id: contact_id.to_owned(),
                    last_activity_at: now,
                    warned: false,
                    contact_initiated: false,
                    ticket: mint_ticket(),
                };
                tracing::debug!(contact_id = %contact_id, ticket = session.ticket, "session created");
                session
            });
        entry.clone()
    }

    /// Mark that the contact opened the menu.
    pub fn mark_initiated(&self, contact_id: &str) {
        let mut sessions = self.sessions.write();
        if let Some(session) = sessions.get_mut(contact_id) {
            session.contact_initiated = true;
        }
    }

    /// Look up a session snapshot.
    pub fn get(&self, contact_id: &str) -> Option<Session> {
        self.sessions.read().get(contact_id).cloned()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// One sweep pass: classify every session against `policy`, flag
    /// newly-warned sessions, and remove terminated ones.
    ///
    /// Keys are snapshotted before any mutation so removal never races the
    /// iteration. The caller is responsible for actually sending the
    /// warning/termination notices.
    pub fn sweep(&self, now: DateTime<Utc>, policy: &IdlePolicy) -> SweepOutcome {
        let mut outcome = SweepOutcome::default();
        let mut sessions = self.sessions.write();

        let contact_ids: Vec<String> = sessions.keys().cloned().collect();
        for contact_id in contact_ids {
            let Some(session) = sessions.get_mut(&contact_id) else {
                continue;
            };
            match policy.classify(session.last_activity_at, session.warned, now) {
                IdleState::TerminateDue => {
                    sessions.remove(&contact_id);
                    outcome.terminations.push(contact_id);
                }
                IdleState::WarnDue => {
                    session.warned = true;
                    outcome.warnings.push(contact_id);
                }
                IdleState::Active => {}
            }
        }

        if !outcome.warnings.is_empty() || !outcome.terminations.is_empty() {
            tracing::info!(
                warnings = outcome.warnings.len(),
                terminations = outcome.terminations.len(),
                remaining = sessions.len(),
                "idle sweep"
            );
        }
        outcome
    }
}

fn mint_ticket() -> u32 {
    rand::thread_rng().gen_range(10_000..100_000)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
