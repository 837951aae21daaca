//! Inbound commands from the transport collaborator.
//!
//! Commands are validated against the sender's assigned combatant and
//! executed strictly in arrival order per session.

use serde::{Deserialize, Serialize};

use crate::enums::DodgePosture;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatCommand {
    /// Fire a fitted direct-fire weapon at the opponent.
    Fire { weapon_index: usize },
    /// Launch a missile that closes one range band per round.
    LaunchMissile,
    /// Attempt to shoot down an incoming missile before it impacts.
    PointDefense { missile_id: u32 },
    /// Deploy a sand canister for a temporary armor bonus.
    UseCountermeasure,
    /// Hold an evasive posture until the next own turn.
    Dodge { posture: DodgePosture },
    /// Attempt emergency repairs on hull and critical effects.
    Repair,
    /// Finish the turn without further action.
    EndTurn,
    /// Leave the session, conceding the fight.
    Abandon,
}
