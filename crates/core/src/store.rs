//! In-Memory Session Store
//!
//! The keyed table of live sessions. It is an explicit object created at
//! process start and handed to the orchestrator, never ambient module
//! state, so its lifetime and its concurrency behavior are visible.

use crate::session::{Session, Turn};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Keyed table of live sessions.
///
/// The lock only guards individual map operations. A `respond` in flight
/// holds no lock across its generation await, so two concurrent `respond`
/// calls on the *same* id interleave their generation calls and append
/// their interviewer replies in whichever order those calls complete.
/// That hazard is accepted and documented rather than serialized away.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a newly created session.
    pub async fn insert(&self, session: Session) {
        self.sessions.write().await.insert(session.id, session);
    }

    /// Full clone of a session's current state, if it is live.
    pub async fn snapshot(&self, id: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Appends a turn to a live session's history. Returns `false` when
    /// the session is not in the store (e.g. it was ended mid-flight).
    pub async fn append_turn(&self, id: Uuid, turn: Turn) -> bool {
        match self.sessions.write().await.get_mut(&id) {
            Some(session) => {
                session.history.push(turn);
                true
            }
            None => false,
        }
    }

    /// Removes a session, returning its final state.
    pub async fn remove(&self, id: Uuid) -> Option<Session> {
        self.sessions.write().await.remove(&id)
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
