//! Events emitted by the combat core for the transport collaborator.

use serde::{Deserialize, Serialize};

use crate::enums::{CritSeverity, DodgePosture, EndReason, ShipSystem};
use crate::errors::RejectReason;
use crate::types::{CombatantId, RangeBand};

/// Which parties receive an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    /// Broadcast to both parties.
    Both,
    /// Delivered to a single party only.
    Party(CombatantId),
}

/// An event paired with its delivery audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outbound {
    pub audience: Audience,
    pub event: CombatEvent,
}

impl Outbound {
    /// Broadcast to both parties.
    pub fn both(event: CombatEvent) -> Self {
        Self {
            audience: Audience::Both,
            event,
        }
    }

    /// Deliver to one party only.
    pub fn to(party: CombatantId, event: CombatEvent) -> Self {
        Self {
            audience: Audience::Party(party),
            event,
        }
    }
}

/// Hull readout for one party, used in round and end-of-combat events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyHull {
    pub party: CombatantId,
    pub hull: u32,
}

/// All events the core can emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// The turn passed to the other party within the same round.
    TurnChange {
        active_party: CombatantId,
        round: u32,
    },
    /// Both parties acted; a new round began.
    NewRound { round: u32, hulls: Vec<PartyHull> },
    /// Result of an attack, delivered to the acting party.
    AttackResult {
        hit: bool,
        damage: Option<u32>,
        target_hull: u32,
    },
    /// Notification of being attacked, delivered to the target.
    Attacked {
        hit: bool,
        damage: Option<u32>,
        hull: u32,
        max_hull: u32,
    },
    /// A critical hit effect landed.
    Critical {
        target: CombatantId,
        system: ShipSystem,
        severity: CritSeverity,
        damage: u32,
    },
    /// A missile entered flight.
    MissileLaunched {
        missile_id: u32,
        attacker: CombatantId,
        defender: CombatantId,
        current_range: RangeBand,
        ammo_remaining: u32,
    },
    /// A missile closed one range band at the round boundary.
    MissileMoved {
        missile_id: u32,
        old_range: RangeBand,
        new_range: RangeBand,
    },
    /// A missile reached `Adjacent` and its impact was resolved.
    MissileImpact {
        missile_id: u32,
        hit: bool,
        damage: u32,
        target_hull: u32,
    },
    /// Outcome of a point-defense attempt.
    PointDefenseResult {
        missile_id: u32,
        destroyed: bool,
        roll: i32,
        total: i32,
    },
    /// A sand canister was deployed.
    CountermeasureDeployed {
        party: CombatantId,
        sand_remaining: u32,
    },
    /// A combatant declared an evasive posture.
    DodgeDeclared {
        party: CombatantId,
        posture: DodgePosture,
    },
    /// Outcome of an emergency repair attempt.
    RepairResult {
        party: CombatantId,
        success: bool,
        roll: i32,
        total: i32,
        hull_restored: u32,
        hull: u32,
    },
    /// The session ended.
    CombatEnd {
        winner: CombatantId,
        loser: CombatantId,
        /// Absent on a normal kill.
        reason: Option<EndReason>,
        final_hulls: Vec<PartyHull>,
        rounds: u32,
    },
    /// A command failed validation; delivered to the originator only.
    Rejected { reason: RejectReason },
}
