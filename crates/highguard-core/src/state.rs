//! Read-only snapshot views of session state.
//!
//! Snapshots are built fresh per emission for the presentation
//! collaborator and the AI decision context; nothing holds onto live
//! session state.

use serde::{Deserialize, Serialize};

use crate::enums::{DodgePosture, SessionPhase, StrategyKind};
use crate::events::CombatEvent;
use crate::ship::{CriticalHit, ShipClass, WeaponId};
use crate::types::{CombatantId, RangeBand, SessionId};

/// Complete visible state of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub phase: SessionPhase,
    pub round: u32,
    pub range: RangeBand,
    pub active_party: CombatantId,
    pub combatants: Vec<CombatantView>,
    pub missiles: Vec<MissileView>,
    pub last_activity_ms: u64,
}

/// One party's visible state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantView {
    pub id: CombatantId,
    pub class: ShipClass,
    pub hull: u32,
    pub max_hull: u32,
    pub armor: u32,
    pub turrets: u32,
    pub missiles: u32,
    pub sand: u32,
    pub weapons: Vec<WeaponId>,
    pub criticals: Vec<CriticalHit>,
    pub dodge: DodgePosture,
    pub countermeasure_bonus: u32,
    pub turn_complete: bool,
    /// AI strategy driving this party, `None` for a human.
    pub strategy: Option<StrategyKind>,
}

/// A missile in flight, as visible to both parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissileView {
    pub id: u32,
    pub attacker: CombatantId,
    pub target: CombatantId,
    pub range: RangeBand,
    pub launched_round: u32,
    pub turns_to_impact: u32,
}

/// One round's emitted events, retained in the session's bounded log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub events: Vec<CombatEvent>,
}
