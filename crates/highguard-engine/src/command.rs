//! Command layer — validated, reversible player actions.
//!
//! Every player-initiated action becomes a `Command` value holding its
//! captured pre/post state. Validation never unwinds for expected
//! failures; execution captures state first and restores it on any
//! unexpected error, so session state is never left half-applied.

use std::collections::VecDeque;

use highguard_core::commands::CombatCommand;
use highguard_core::enums::{AmmoKind, CrewRole, SessionPhase};
use highguard_core::errors::{EngineError, RejectReason, ValidationOutcome};
use highguard_core::events::{CombatEvent, Outbound};
use highguard_core::rules;
use highguard_core::ship::WeaponId;
use highguard_core::types::CombatantId;

use crate::resolver::{self, AttackSpec};
use crate::session::{CombatSession, StateSnapshot};

/// A single player action with captured pre/post state.
#[derive(Debug, Clone)]
pub struct Command {
    pub kind: CombatCommand,
    pub actor: CombatantId,
    /// State captured immediately before execution.
    pub before: Option<StateSnapshot>,
    /// State captured immediately after execution; redo restores this
    /// without re-rolling anything.
    pub after: Option<StateSnapshot>,
    /// Events produced by execution, kept for replay.
    pub result: Vec<Outbound>,
    pub executed: bool,
}

impl Command {
    pub fn new(actor: CombatantId, kind: CombatCommand) -> Self {
        Self {
            kind,
            actor,
            before: None,
            after: None,
            result: Vec::new(),
            executed: false,
        }
    }

    /// Check preconditions in order: session accepting actions, the
    /// actor's turn, not already acted, then action-specific checks.
    pub fn validate(&self, session: &CombatSession) -> ValidationOutcome {
        if session.phase != SessionPhase::Active {
            return ValidationOutcome::reject(RejectReason::SessionNotActive);
        }
        let Some(slot) = session.slot_of(self.actor) else {
            return ValidationOutcome::reject(RejectReason::NotYourTurn);
        };
        if session.active_party != self.actor {
            return ValidationOutcome::reject(RejectReason::NotYourTurn);
        }
        if session.turn_complete[slot] {
            return ValidationOutcome::reject(RejectReason::AlreadyActed);
        }

        let actor = &session.combatants[slot];
        match &self.kind {
            CombatCommand::Fire { weapon_index } => {
                let Some(weapon) = actor.weapon_at(*weapon_index) else {
                    return ValidationOutcome::reject(RejectReason::NoWeapon);
                };
                let spec = weapon.spec();
                if !spec.direct_fire {
                    return ValidationOutcome::reject(RejectReason::NoWeapon);
                }
                if let Some(bands) = spec.ranges {
                    if !bands.contains(&session.range) {
                        return ValidationOutcome::reject(RejectReason::OutOfRange);
                    }
                }
                if let Some(kind) = spec.ammo {
                    if actor.ammo(kind) == 0 {
                        return ValidationOutcome::reject(RejectReason::InsufficientAmmo {
                            kind,
                        });
                    }
                }
                ValidationOutcome::ok()
            }
            CombatCommand::LaunchMissile => {
                if !actor.fitted(WeaponId::MissileRack) {
                    return ValidationOutcome::reject(RejectReason::NoWeapon);
                }
                if actor.missiles == 0 {
                    return ValidationOutcome::reject(RejectReason::InsufficientAmmo {
                        kind: AmmoKind::Missiles,
                    });
                }
                ValidationOutcome::ok()
            }
            CombatCommand::PointDefense { missile_id } => {
                if actor.turrets == 0 {
                    return ValidationOutcome::reject(RejectReason::NoWeapon);
                }
                match session.missiles.get(*missile_id) {
                    Some(missile) if missile.target == self.actor => ValidationOutcome::ok(),
                    _ => ValidationOutcome::reject(RejectReason::NoTarget),
                }
            }
            CombatCommand::UseCountermeasure => {
                if !actor.fitted(WeaponId::Sandcaster) {
                    return ValidationOutcome::reject(RejectReason::NoWeapon);
                }
                if actor.sand == 0 {
                    return ValidationOutcome::reject(RejectReason::InsufficientAmmo {
                        kind: AmmoKind::Sand,
                    });
                }
                ValidationOutcome::ok()
            }
            CombatCommand::Repair => {
                if actor.hull >= actor.max_hull && actor.criticals.is_empty() {
                    return ValidationOutcome::reject(RejectReason::NothingToRepair);
                }
                ValidationOutcome::ok()
            }
            CombatCommand::Dodge { .. } | CombatCommand::EndTurn | CombatCommand::Abandon => {
                ValidationOutcome::ok()
            }
        }
    }

    /// Capture the pre-state, apply the effect, mark the actor's turn
    /// complete, and store the post-state and result events. On an
    /// unexpected error the captured pre-state is restored first.
    pub fn execute(
        &mut self,
        session: &mut CombatSession,
        threshold: i32,
    ) -> Result<Vec<Outbound>, EngineError> {
        let before = session.capture();
        match self.apply(session, threshold) {
            Ok(events) => {
                if let Some(slot) = session.slot_of(self.actor) {
                    session.turn_complete[slot] = true;
                }
                self.before = Some(before);
                self.after = Some(session.capture());
                self.result = events.clone();
                self.executed = true;
                Ok(events)
            }
            Err(error) => {
                session.restore(&before);
                Err(error)
            }
        }
    }

    /// Restore every captured field to its pre-execute value.
    pub fn undo(&self, session: &mut CombatSession) -> bool {
        match &self.before {
            Some(snapshot) => {
                session.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Reapply the cached post-execute state; no dice are re-rolled.
    pub fn redo(&self, session: &mut CombatSession) -> bool {
        match &self.after {
            Some(snapshot) if self.executed => {
                session.restore(snapshot);
                true
            }
            _ => false,
        }
    }

    /// Perform the action's effect. All fallible work happens before
    /// any mutation within each arm.
    fn apply(
        &self,
        session: &mut CombatSession,
        threshold: i32,
    ) -> Result<Vec<Outbound>, EngineError> {
        let actor_slot = session
            .slot_of(self.actor)
            .ok_or(EngineError::NotAParticipant(self.actor))?;
        let target_slot = 1 - actor_slot;
        let target_id = session.combatants[target_slot].id;

        match &self.kind {
            CombatCommand::Fire { weapon_index } => {
                let weapon = session.combatants[actor_slot]
                    .weapon_at(*weapon_index)
                    .ok_or(EngineError::UnknownWeapon(*weapon_index))?
                    .spec();
                let spec = AttackSpec {
                    range: session.range,
                    dodge: session.combatants[target_slot].dodge,
                    weapon: &weapon,
                    threshold,
                };
                let result = resolver::resolve_attack(
                    &session.combatants[actor_slot],
                    &session.combatants[target_slot],
                    &spec,
                    &mut session.dice,
                )?;

                let before_hull = session.combatants[target_slot].hull;
                session.combatants[target_slot].hull = result.new_hull;
                if let Some(kind) = weapon.ammo {
                    session.combatants[actor_slot].spend_ammo(kind);
                }

                let damage = result.hit.then_some(result.damage);
                let mut events = vec![
                    Outbound::to(
                        self.actor,
                        CombatEvent::AttackResult {
                            hit: result.hit,
                            damage,
                            target_hull: result.new_hull,
                        },
                    ),
                    Outbound::to(
                        target_id,
                        CombatEvent::Attacked {
                            hit: result.hit,
                            damage,
                            hull: result.new_hull,
                            max_hull: session.combatants[target_slot].max_hull,
                        },
                    ),
                ];

                if result.hit {
                    let max_hull = session.combatants[target_slot].max_hull;
                    if let Some(crit) = resolver::roll_critical(
                        before_hull,
                        result.new_hull,
                        max_hull,
                        &mut session.dice,
                    ) {
                        session.combatants[target_slot].criticals.push(crit);
                        events.push(Outbound::both(CombatEvent::Critical {
                            target: target_id,
                            system: crit.system,
                            severity: crit.severity,
                            damage: crit.damage,
                        }));
                    }
                }
                Ok(events)
            }
            CombatCommand::LaunchMissile => {
                session.combatants[actor_slot].spend_ammo(AmmoKind::Missiles);
                let missile = session.missiles.launch(
                    self.actor,
                    target_id,
                    session.range,
                    session.round,
                );
                Ok(vec![Outbound::both(CombatEvent::MissileLaunched {
                    missile_id: missile.id,
                    attacker: self.actor,
                    defender: target_id,
                    current_range: missile.current_range,
                    ammo_remaining: session.combatants[actor_slot].missiles,
                })])
            }
            CombatCommand::PointDefense { missile_id } => {
                let gunnery = session.combatants[actor_slot].skill(CrewRole::Gunner);
                match session
                    .missiles
                    .point_defense(*missile_id, gunnery, &mut session.dice)
                {
                    Some(outcome) => Ok(vec![Outbound::both(
                        CombatEvent::PointDefenseResult {
                            missile_id: outcome.missile_id,
                            destroyed: outcome.destroyed,
                            roll: outcome.roll,
                            total: outcome.total,
                        },
                    )]),
                    // Validation saw the missile; it cannot vanish between
                    // validate and execute on the serialized queue.
                    None => Ok(Vec::new()),
                }
            }
            CombatCommand::UseCountermeasure => {
                session.combatants[actor_slot].spend_ammo(AmmoKind::Sand);
                session.combatants[actor_slot].countermeasure_bonus =
                    rules::COUNTERMEASURE_ARMOR_BONUS;
                Ok(vec![Outbound::both(CombatEvent::CountermeasureDeployed {
                    party: self.actor,
                    sand_remaining: session.combatants[actor_slot].sand,
                })])
            }
            CombatCommand::Dodge { posture } => {
                session.combatants[actor_slot].dodge = *posture;
                Ok(vec![Outbound::both(CombatEvent::DodgeDeclared {
                    party: self.actor,
                    posture: *posture,
                })])
            }
            CombatCommand::Repair => {
                let engineer = session.combatants[actor_slot].skill(CrewRole::Engineer);
                let severity_dm = session.combatants[actor_slot]
                    .criticals
                    .last()
                    .map(|crit| rules::crit_repair_dm(crit.severity))
                    .unwrap_or(0);
                let target = rules::REPAIR_THRESHOLD + severity_dm;
                let roll = session.dice.roll_2d6();
                let total = roll.total + engineer;
                let success = total >= target;

                let mut hull_restored = 0;
                if success {
                    // Effect-scaled: hull restored grows with the margin.
                    let effect = (total - target).max(0) as u32;
                    let actor = &mut session.combatants[actor_slot];
                    hull_restored = (effect + 1).min(actor.max_hull - actor.hull);
                    actor.hull += hull_restored;
                    actor.criticals.pop();
                }
                Ok(vec![Outbound::both(CombatEvent::RepairResult {
                    party: self.actor,
                    success,
                    roll: roll.total,
                    total,
                    hull_restored,
                    hull: session.combatants[actor_slot].hull,
                })])
            }
            CombatCommand::EndTurn => Ok(Vec::new()),
            // Abandon tears the session down at the engine level and
            // never reaches the reversible command path.
            CombatCommand::Abandon => Ok(Vec::new()),
        }
    }
}

/// Bounded undo history plus redo stack, owned by one session.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: VecDeque<Command>,
    redo: Vec<Command>,
}

impl CommandHistory {
    /// Record an executed command, dropping the oldest beyond the cap.
    /// Any redo tail is invalidated.
    pub fn push(&mut self, command: Command) {
        if self.entries.len() >= rules::COMMAND_HISTORY_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(command);
        self.redo.clear();
    }

    /// Undo the most recent command against the session.
    pub fn undo(&mut self, session: &mut CombatSession) -> Result<(), EngineError> {
        let command = self.entries.pop_back().ok_or(EngineError::NothingToUndo)?;
        command.undo(session);
        self.redo.push(command);
        Ok(())
    }

    /// Redo the most recently undone command against the session.
    pub fn redo(&mut self, session: &mut CombatSession) -> Result<(), EngineError> {
        let command = self.redo.pop().ok_or(EngineError::NothingToRedo)?;
        command.redo(session);
        if self.entries.len() >= rules::COMMAND_HISTORY_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(command);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.redo.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent executed command, if any.
    pub fn last(&self) -> Option<&Command> {
        self.entries.back()
    }
}
