//! Live session registry.
//!
//! An explicit value owned by the composition root and passed by
//! reference into the components that need it — no ambient global
//! state. Sessions live here from creation until victory, forfeiture,
//! abandonment, or external reclamation.

use std::collections::HashMap;

use highguard_core::types::SessionId;

use crate::session::CombatSession;

/// Owns every live combat session.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, CombatSession>,
    next_id: u64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next session id.
    pub fn allocate_id(&mut self) -> SessionId {
        self.next_id += 1;
        SessionId(self.next_id)
    }

    pub fn insert(&mut self, session: CombatSession) {
        self.sessions.insert(session.id, session);
    }

    pub fn get(&self, id: SessionId) -> Option<&CombatSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut CombatSession> {
        self.sessions.get_mut(&id)
    }

    pub fn remove(&mut self, id: SessionId) -> Option<CombatSession> {
        self.sessions.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Ids of all live sessions, in stable order.
    pub fn ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Sessions with no activity since `cutoff_ms` — the reclamation
    /// hook for the external lifecycle collaborator. The registry never
    /// deletes these itself.
    pub fn idle_since(&self, cutoff_ms: u64) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self
            .sessions
            .values()
            .filter(|s| s.last_activity_ms < cutoff_ms)
            .map(|s| s.id)
            .collect();
        ids.sort();
        ids
    }
}
