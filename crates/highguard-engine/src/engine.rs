//! Combat engine — the composition root.
//!
//! `CombatEngine` owns the session registry, the injectable clock, and
//! the configuration. Inbound commands queue into per-session FIFO
//! inboxes; `pump` drains each inbox strictly in arrival order and then
//! runs due deferred AI turns, so only one command is ever in flight
//! against a session.

use tracing::{debug, info, warn};

use highguard_ai::DecisionContext;
use highguard_core::commands::CombatCommand;
use highguard_core::enums::{EndReason, SessionPhase, StrategyKind};
use highguard_core::errors::{EngineError, RejectReason};
use highguard_core::events::{CombatEvent, Outbound};
use highguard_core::rules;
use highguard_core::ship::{Combatant, ShipClass};
use highguard_core::state::SessionSnapshot;
use highguard_core::types::{CombatantId, RangeBand, SessionId};

use crate::clock::{Clock, SystemClock};
use crate::command::Command;
use crate::registry::SessionRegistry;
use crate::session::CombatSession;
use crate::turns;

/// Configuration for the combat engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base RNG seed. Same seed + same inputs = same combat.
    pub seed: u64,
    /// Artificial delay before a scheduled AI turn executes (ms).
    pub ai_delay_ms: u64,
    /// Attack target number.
    pub hit_threshold: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ai_delay_ms: rules::AI_REENTRY_DELAY_MS,
            hit_threshold: rules::HIT_THRESHOLD,
        }
    }
}

/// One party's slot in a new session.
#[derive(Debug, Clone, Copy)]
pub struct PartySpec {
    pub id: CombatantId,
    pub class: ShipClass,
    /// `Some` substitutes an AI opponent for this party.
    pub strategy: Option<StrategyKind>,
}

/// The engine owning all live combat sessions.
pub struct CombatEngine {
    registry: SessionRegistry,
    clock: Box<dyn Clock>,
    config: EngineConfig,
    outbox: Vec<(SessionId, Outbound)>,
}

impl CombatEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Build with an explicit clock (tests drive time manually).
    pub fn with_clock(config: EngineConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            registry: SessionRegistry::new(),
            clock,
            config,
            outbox: Vec::new(),
        }
    }

    /// Create a session for two parties at the given opening range.
    /// AI-substituted parties are ready immediately; the session starts
    /// once both are (see [`CombatEngine::mark_ready`]).
    pub fn create_session(
        &mut self,
        party1: PartySpec,
        party2: PartySpec,
        range: RangeBand,
    ) -> SessionId {
        let id = self.registry.allocate_id();
        let now = self.clock.now_ms();
        let seed = self.config.seed ^ id.0.wrapping_mul(0x9e3779b97f4a7c15);
        let combatants = [
            Combatant::new(party1.id, party1.class),
            Combatant::new(party2.id, party2.class),
        ];
        let ai = [party1.strategy, party2.strategy];
        let session = CombatSession::new(id, combatants, ai, range, seed, now);
        info!(session = id.0, "combat session created");
        self.registry.insert(session);

        // Two AI parties are both ready at creation.
        self.try_start(id, now);
        id
    }

    /// Mark a human party ready; the session activates when both are.
    pub fn mark_ready(
        &mut self,
        session_id: SessionId,
        party: CombatantId,
    ) -> Result<(), EngineError> {
        let session = self
            .registry
            .get_mut(session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;
        let slot = session
            .slot_of(party)
            .ok_or(EngineError::NotAParticipant(party))?;
        session.ready[slot] = true;
        let now = self.clock.now_ms();
        self.try_start(session_id, now);
        Ok(())
    }

    /// Append a command to the session's FIFO inbox. Execution happens
    /// on the next [`CombatEngine::pump`], in arrival order.
    pub fn queue_command(
        &mut self,
        session_id: SessionId,
        party: CombatantId,
        command: CombatCommand,
    ) -> Result<(), EngineError> {
        let session = self
            .registry
            .get_mut(session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;
        if session.slot_of(party).is_none() {
            return Err(EngineError::NotAParticipant(party));
        }
        session.inbox.push_back((party, command));
        Ok(())
    }

    /// Drain every session's inbox in arrival order, then run due
    /// deferred AI turns. Returns all emitted events.
    pub fn pump(&mut self) -> Vec<(SessionId, Outbound)> {
        let now = self.clock.now_ms();
        for id in self.registry.ids() {
            self.pump_session(id, now);
        }
        std::mem::take(&mut self.outbox)
    }

    /// A party's transport connection dropped: the session ends
    /// immediately in favor of the remaining party.
    pub fn handle_disconnect(
        &mut self,
        session_id: SessionId,
        party: CombatantId,
    ) -> Result<(), EngineError> {
        let session = self
            .registry
            .get_mut(session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;
        let winner = session
            .opponent_of(party)
            .ok_or(EngineError::NotAParticipant(party))?;
        let mut events = Vec::new();
        turns::finish(
            session,
            winner,
            Some(EndReason::OpponentDisconnected),
            &mut events,
        );
        for outbound in &events {
            session.log_event(&outbound.event);
        }
        info!(session = session_id.0, "session forfeited on disconnect");
        self.outbox
            .extend(events.into_iter().map(|e| (session_id, e)));
        self.registry.remove(session_id);
        Ok(())
    }

    /// Explicit reclamation by the external lifecycle collaborator.
    pub fn delete_session(&mut self, session_id: SessionId) -> Result<(), EngineError> {
        self.registry
            .remove(session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;
        info!(session = session_id.0, "session deleted");
        Ok(())
    }

    /// Undo the most recent executed command.
    pub fn undo_last(&mut self, session_id: SessionId) -> Result<(), EngineError> {
        let session = self
            .registry
            .get_mut(session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;
        let mut history = std::mem::take(&mut session.history);
        let result = history.undo(session);
        session.history = history;
        result
    }

    /// Redo the most recently undone command, then re-run the turn
    /// transition so round/turn state matches the restored post-state.
    pub fn redo_last(&mut self, session_id: SessionId) -> Result<(), EngineError> {
        let now = self.clock.now_ms();
        let session = self
            .registry
            .get_mut(session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;
        let mut history = std::mem::take(&mut session.history);
        let result = history.redo(session);
        session.history = history;
        if result.is_ok() {
            let mut events = Vec::new();
            turns::after_action(session, now, self.config.ai_delay_ms, &mut events);
            for outbound in &events {
                session.log_event(&outbound.event);
            }
            let ended = session.phase != SessionPhase::Active;
            self.outbox
                .extend(events.into_iter().map(|e| (session_id, e)));
            if ended {
                self.registry.remove(session_id);
            }
        }
        result
    }

    /// Read-only view of a session.
    pub fn snapshot(&self, session_id: SessionId) -> Result<SessionSnapshot, EngineError> {
        self.registry
            .get(session_id)
            .map(|s| s.snapshot())
            .ok_or(EngineError::SessionNotFound(session_id))
    }

    /// Sessions idle since the cutoff (reclamation scan).
    pub fn idle_since(&self, cutoff_ms: u64) -> Vec<SessionId> {
        self.registry.idle_since(cutoff_ms)
    }

    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    #[cfg(test)]
    pub fn session(&self, session_id: SessionId) -> Option<&CombatSession> {
        self.registry.get(session_id)
    }

    #[cfg(test)]
    pub fn session_mut(&mut self, session_id: SessionId) -> Option<&mut CombatSession> {
        self.registry.get_mut(session_id)
    }

    /// Activate a session once both parties are ready.
    fn try_start(&mut self, session_id: SessionId, now_ms: u64) {
        let Some(session) = self.registry.get_mut(session_id) else {
            return;
        };
        if session.phase != SessionPhase::AwaitingPlayers || !session.both_ready() {
            return;
        }
        let mut events = Vec::new();
        turns::begin_session(session, now_ms, self.config.ai_delay_ms, &mut events);
        for outbound in &events {
            session.log_event(&outbound.event);
        }
        debug!(session = session_id.0, "session active");
        self.outbox
            .extend(events.into_iter().map(|e| (session_id, e)));
    }

    /// Drain one session's inbox, then run its due AI turns.
    fn pump_session(&mut self, session_id: SessionId, now_ms: u64) {
        loop {
            let Some(session) = self.registry.get_mut(session_id) else {
                return;
            };
            let Some((party, command)) = session.inbox.pop_front() else {
                break;
            };
            self.process_command(session_id, party, command, now_ms);
        }

        // Deferred AI turns share the same serialized queue: they only
        // run after the inbox is empty, and each run re-validates.
        loop {
            let Some(session) = self.registry.get_mut(session_id) else {
                return;
            };
            let due = session.pending_ai_at.map_or(false, |at| at <= now_ms);
            if !due {
                break;
            }
            session.pending_ai_at = None;
            self.run_ai_turn(session_id, now_ms);
        }
    }

    /// Validate and execute one command against a session.
    fn process_command(
        &mut self,
        session_id: SessionId,
        party: CombatantId,
        command: CombatCommand,
        now_ms: u64,
    ) {
        if command == CombatCommand::Abandon {
            self.handle_abandon(session_id, party);
            return;
        }

        let Some(session) = self.registry.get_mut(session_id) else {
            return;
        };

        let mut cmd = Command::new(party, command);
        let outcome = cmd.validate(session);
        if !outcome.valid {
            let reason = outcome.reason.unwrap_or(RejectReason::SessionNotActive);
            warn!(
                session = session_id.0,
                party = party.0,
                code = %reason.code(),
                "command rejected"
            );
            self.outbox.push((
                session_id,
                Outbound::to(party, CombatEvent::Rejected { reason }),
            ));
            return;
        }

        let mut events = match cmd.execute(session, self.config.hit_threshold) {
            Ok(events) => events,
            Err(error) => {
                warn!(session = session_id.0, %error, "command execution failed");
                self.outbox.push((
                    session_id,
                    Outbound::to(
                        party,
                        CombatEvent::Rejected {
                            reason: RejectReason::ExecutionFailed,
                        },
                    ),
                ));
                return;
            }
        };

        debug!(session = session_id.0, party = party.0, "command executed");
        session.touch(now_ms);
        session.history.push(cmd);
        turns::after_action(session, now_ms, self.config.ai_delay_ms, &mut events);

        for outbound in &events {
            session.log_event(&outbound.event);
        }
        let ended = session.phase != SessionPhase::Active;
        self.outbox
            .extend(events.into_iter().map(|e| (session_id, e)));
        if ended {
            info!(session = session_id.0, "session ended");
            self.registry.remove(session_id);
        }
    }

    /// Explicit abandonment: tear the session down immediately and
    /// discard any pending scheduled AI turn.
    fn handle_abandon(&mut self, session_id: SessionId, party: CombatantId) {
        let Some(session) = self.registry.get_mut(session_id) else {
            return;
        };
        let Some(winner) = session.opponent_of(party) else {
            return;
        };
        let mut events = Vec::new();
        turns::finish(session, winner, Some(EndReason::Abandoned), &mut events);
        for outbound in &events {
            session.log_event(&outbound.event);
        }
        info!(session = session_id.0, party = party.0, "session abandoned");
        self.outbox
            .extend(events.into_iter().map(|e| (session_id, e)));
        self.registry.remove(session_id);
    }

    /// Decide and execute one AI turn. Stale tasks (session ended, no
    /// longer the AI's turn) are no-ops.
    fn run_ai_turn(&mut self, session_id: SessionId, now_ms: u64) {
        let Some(session) = self.registry.get_mut(session_id) else {
            return;
        };
        if session.phase != SessionPhase::Active {
            return;
        }
        let active = session.active_party;
        let Some(strategy) = session.strategy_of(active) else {
            return;
        };

        let snapshot = session.snapshot();
        let context = DecisionContext::from_snapshot(&snapshot, active);
        let command = highguard_ai::decide(&context, strategy, session.dice.rng_mut());
        debug!(
            session = session_id.0,
            party = active.0,
            ?strategy,
            ?command,
            "ai decision"
        );
        self.process_command(session_id, active, command, now_ms);
    }
}
