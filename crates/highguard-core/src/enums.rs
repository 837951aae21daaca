//! Enumeration types used throughout the combat core.

use serde::{Deserialize, Serialize};

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, waiting for both parties to be ready.
    #[default]
    AwaitingPlayers,
    /// Combat in progress.
    Active,
    /// Ended by a normal kill.
    Victory,
    /// Ended because a party's transport connection dropped.
    Forfeited,
    /// Ended by an explicit abandon command.
    Abandoned,
}

/// Dodge posture held by a combatant until its next turn begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DodgePosture {
    /// No evasive maneuvering.
    #[default]
    Steady,
    /// Light evasive weaving.
    Evasive,
    /// All thrust into evasion.
    AllOut,
}

/// Munition types with tracked ammunition counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmmoKind {
    /// Multi-round seeking munitions.
    Missiles,
    /// Sand canisters for the countermeasure launcher.
    Sand,
}

impl AmmoKind {
    /// Stable wire fragment used in reject codes (`insufficient_<kind>`).
    pub fn code(self) -> &'static str {
        match self {
            AmmoKind::Missiles => "missiles",
            AmmoKind::Sand => "sand",
        }
    }
}

/// Severity of a critical hit, worsening as hull falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CritSeverity {
    Light,
    Moderate,
    Severe,
    Critical,
}

/// Ship system struck by a critical hit (2d6 location table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipSystem {
    Sensors,
    PowerPlant,
    Fuel,
    Weapon,
    Armor,
    Hull,
    Maneuver,
    Cargo,
    Computer,
    Crew,
    Bridge,
}

/// Crew role used to look up skill modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrewRole {
    /// Flies the ship; feeds the (unused) initiative helper in the
    /// original rules, kept as crew reference data.
    Pilot,
    /// Attack and point-defense modifier.
    Gunner,
    /// Repair check modifier.
    Engineer,
}

/// Opponent decision policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    #[default]
    Balanced,
    Aggressive,
    Defensive,
    Cautious,
}

/// Why a session ended, when the end was not a normal kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The losing party's transport connection was lost mid-session.
    OpponentDisconnected,
    /// The losing party abandoned the session.
    Abandoned,
}
