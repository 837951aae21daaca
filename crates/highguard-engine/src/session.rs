//! Combat session state.
//!
//! A session is one encounter between two combatants. All inbound work
//! for a session lands in its FIFO inbox and is processed strictly in
//! arrival order; the scheduled AI turn is a deferred task on the same
//! queue, so only one command is ever in flight per session.

use std::collections::VecDeque;

use highguard_core::commands::CombatCommand;
use highguard_core::enums::{DodgePosture, SessionPhase, StrategyKind};
use highguard_core::events::CombatEvent;
use highguard_core::rules;
use highguard_core::ship::Combatant;
use highguard_core::state::{CombatantView, RoundRecord, SessionSnapshot};
use highguard_core::types::{CombatantId, RangeBand, SessionId};

use crate::command::CommandHistory;
use crate::dice::Dice;
use crate::missiles::MissileTracker;

/// Captured session state for undo/redo.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub round: u32,
    pub active_party: CombatantId,
    pub turn_complete: [bool; 2],
    pub range: RangeBand,
    pub combatants: [Combatant; 2],
    pub missiles: MissileTracker,
}

/// One combat encounter between two parties.
#[derive(Debug)]
pub struct CombatSession {
    pub id: SessionId,
    pub phase: SessionPhase,
    pub combatants: [Combatant; 2],
    pub range: RangeBand,
    /// Current round, starting at 1.
    pub round: u32,
    pub active_party: CombatantId,
    /// Per-slot acted-this-round flags, reset at each rollover.
    pub turn_complete: [bool; 2],
    /// Per-slot readiness; AI slots are ready from creation.
    pub ready: [bool; 2],
    /// AI strategy per slot; `None` marks a human party.
    pub ai: [Option<StrategyKind>; 2],
    pub missiles: MissileTracker,
    pub history: CommandHistory,
    /// Bounded per-round event log, oldest round first.
    pub round_log: VecDeque<RoundRecord>,
    pub last_activity_ms: u64,
    pub dice: Dice,
    /// Commands awaiting execution, strictly in arrival order.
    pub inbox: VecDeque<(CombatantId, CombatCommand)>,
    /// Scheduled AI turn, if one is pending (at most one per session).
    pub pending_ai_at: Option<u64>,
}

impl CombatSession {
    pub fn new(
        id: SessionId,
        combatants: [Combatant; 2],
        ai: [Option<StrategyKind>; 2],
        range: RangeBand,
        seed: u64,
        now_ms: u64,
    ) -> Self {
        let active_party = combatants[0].id;
        Self {
            id,
            phase: SessionPhase::AwaitingPlayers,
            combatants,
            range,
            round: 1,
            active_party,
            turn_complete: [false, false],
            ready: [ai[0].is_some(), ai[1].is_some()],
            ai,
            missiles: MissileTracker::default(),
            history: CommandHistory::default(),
            round_log: VecDeque::new(),
            last_activity_ms: now_ms,
            dice: Dice::new(seed),
            inbox: VecDeque::new(),
            pending_ai_at: None,
        }
    }

    /// Slot index (0 or 1) of a participant, `None` for outsiders.
    pub fn slot_of(&self, id: CombatantId) -> Option<usize> {
        self.combatants.iter().position(|c| c.id == id)
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.slot_of(id).map(|slot| &self.combatants[slot])
    }

    /// The other party's id.
    pub fn opponent_of(&self, id: CombatantId) -> Option<CombatantId> {
        self.slot_of(id).map(|slot| self.combatants[1 - slot].id)
    }

    /// AI strategy controlling a party, `None` for humans.
    pub fn strategy_of(&self, id: CombatantId) -> Option<StrategyKind> {
        self.slot_of(id).and_then(|slot| self.ai[slot])
    }

    pub fn both_ready(&self) -> bool {
        self.ready[0] && self.ready[1]
    }

    pub fn both_turns_complete(&self) -> bool {
        self.turn_complete[0] && self.turn_complete[1]
    }

    /// Party that opens a round: parity alternation, odd rounds to the
    /// first party, even rounds to the second.
    pub fn round_leader(&self, round: u32) -> CombatantId {
        if round % 2 == 1 {
            self.combatants[0].id
        } else {
            self.combatants[1].id
        }
    }

    /// Stamp activity for the inactivity reclamation scan.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
    }

    /// A party becomes active: its round-scoped defenses expire.
    pub fn begin_turn_for(&mut self, id: CombatantId) {
        self.active_party = id;
        if let Some(slot) = self.slot_of(id) {
            self.combatants[slot].dodge = DodgePosture::Steady;
            self.combatants[slot].countermeasure_bonus = 0;
        }
    }

    /// Capture the mutable state a command may touch.
    pub fn capture(&self) -> StateSnapshot {
        StateSnapshot {
            round: self.round,
            active_party: self.active_party,
            turn_complete: self.turn_complete,
            range: self.range,
            combatants: self.combatants.clone(),
            missiles: self.missiles.clone(),
        }
    }

    /// Restore a captured state exactly.
    pub fn restore(&mut self, snapshot: &StateSnapshot) {
        self.round = snapshot.round;
        self.active_party = snapshot.active_party;
        self.turn_complete = snapshot.turn_complete;
        self.range = snapshot.range;
        self.combatants = snapshot.combatants.clone();
        self.missiles = snapshot.missiles.clone();
    }

    /// Append an event to the current round's record, dropping the
    /// oldest round beyond the cap.
    pub fn log_event(&mut self, event: &CombatEvent) {
        let round = self.round;
        match self.round_log.back_mut() {
            Some(record) if record.round == round => record.events.push(event.clone()),
            _ => {
                if self.round_log.len() >= rules::ROUND_LOG_CAP {
                    self.round_log.pop_front();
                }
                self.round_log.push_back(RoundRecord {
                    round,
                    events: vec![event.clone()],
                });
            }
        }
    }

    /// Build the read-only view of this session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let combatants = self
            .combatants
            .iter()
            .enumerate()
            .map(|(slot, c)| CombatantView {
                id: c.id,
                class: c.class,
                hull: c.hull,
                max_hull: c.max_hull,
                armor: c.armor,
                turrets: c.turrets,
                missiles: c.missiles,
                sand: c.sand,
                weapons: c.weapons.clone(),
                criticals: c.criticals.clone(),
                dodge: c.dodge,
                countermeasure_bonus: c.countermeasure_bonus,
                turn_complete: self.turn_complete[slot],
                strategy: self.ai[slot],
            })
            .collect();

        SessionSnapshot {
            session_id: self.id,
            phase: self.phase,
            round: self.round,
            range: self.range,
            active_party: self.active_party,
            combatants,
            missiles: self.missiles.iter().map(|m| m.view()).collect(),
            last_activity_ms: self.last_activity_ms,
        }
    }
}
