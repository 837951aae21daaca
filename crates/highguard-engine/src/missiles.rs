//! Multi-round missile tracking.
//!
//! Missiles close one range band per round until they reach `Adjacent`
//! and are handed back for impact resolution, or are destroyed by point
//! defense first. A missile belongs to exactly one session and is never
//! referenced after removal.

use serde::{Deserialize, Serialize};

use highguard_core::rules;
use highguard_core::state::MissileView;
use highguard_core::types::{CombatantId, RangeBand};

use crate::dice::Dice;

/// A missile in flight toward its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Missile {
    pub id: u32,
    pub attacker: CombatantId,
    pub target: CombatantId,
    pub current_range: RangeBand,
    pub launched_round: u32,
    /// Rounds remaining until the missile reaches `Adjacent`.
    pub turns_to_impact: u32,
}

impl Missile {
    pub fn view(&self) -> MissileView {
        MissileView {
            id: self.id,
            attacker: self.attacker,
            target: self.target,
            range: self.current_range,
            launched_round: self.launched_round,
            turns_to_impact: self.turns_to_impact,
        }
    }
}

/// A missile's movement at a round boundary.
#[derive(Debug, Clone)]
pub enum MissileAdvance {
    /// Closed one band, still in flight.
    Moved {
        id: u32,
        old_range: RangeBand,
        new_range: RangeBand,
    },
    /// Reached `Adjacent`; removed from tracking, impact pending.
    Impacting(Missile),
}

/// Outcome of a point-defense attempt against a tracked missile.
#[derive(Debug, Clone, Copy)]
pub struct PointDefenseOutcome {
    pub missile_id: u32,
    pub destroyed: bool,
    /// Raw 2d6 roll.
    pub roll: i32,
    /// Roll plus gunnery.
    pub total: i32,
}

/// Per-session tracker for missiles in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissileTracker {
    missiles: Vec<Missile>,
    next_id: u32,
}

impl MissileTracker {
    /// Put a new missile in flight at the session's current range.
    pub fn launch(
        &mut self,
        attacker: CombatantId,
        target: CombatantId,
        current_range: RangeBand,
        round: u32,
    ) -> Missile {
        let id = self.next_id;
        self.next_id += 1;
        let missile = Missile {
            id,
            attacker,
            target,
            current_range,
            launched_round: round,
            turns_to_impact: current_range.bands_to_adjacent(),
        };
        self.missiles.push(missile.clone());
        missile
    }

    /// Move every live missile one band closer. Missiles reaching
    /// `Adjacent` are removed from tracking and returned for impact
    /// resolution; the rest report their movement.
    pub fn advance_round(&mut self) -> Vec<MissileAdvance> {
        let mut advances = Vec::new();
        let mut in_flight = Vec::new();
        for mut missile in self.missiles.drain(..) {
            let old_range = missile.current_range;
            missile.current_range = old_range.closer();
            missile.turns_to_impact = missile.turns_to_impact.saturating_sub(1);
            if missile.current_range == RangeBand::Adjacent {
                advances.push(MissileAdvance::Impacting(missile));
            } else {
                advances.push(MissileAdvance::Moved {
                    id: missile.id,
                    old_range,
                    new_range: missile.current_range,
                });
                in_flight.push(missile);
            }
        }
        self.missiles = in_flight;
        advances
    }

    /// Opposed point-defense check: 2d6 + gunnery vs the point-defense
    /// target number. On success the missile is destroyed and removed.
    /// `None` when the id is not tracked.
    pub fn point_defense(
        &mut self,
        missile_id: u32,
        gunnery: i32,
        dice: &mut Dice,
    ) -> Option<PointDefenseOutcome> {
        let index = self.missiles.iter().position(|m| m.id == missile_id)?;
        let roll = dice.roll_2d6();
        let total = roll.total + gunnery;
        let destroyed = total >= rules::POINT_DEFENSE_THRESHOLD;
        if destroyed {
            self.missiles.remove(index);
        }
        Some(PointDefenseOutcome {
            missile_id,
            destroyed,
            roll: roll.total,
            total,
        })
    }

    /// The tracked missile with this id, if still in flight.
    pub fn get(&self, missile_id: u32) -> Option<&Missile> {
        self.missiles.iter().find(|m| m.id == missile_id)
    }

    /// Missiles inbound on the given combatant.
    pub fn incoming(&self, target: CombatantId) -> impl Iterator<Item = &Missile> {
        self.missiles.iter().filter(move |m| m.target == target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Missile> {
        self.missiles.iter()
    }

    pub fn len(&self) -> usize {
        self.missiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missiles.is_empty()
    }
}
