//! Rules constants and modifier tables.

use crate::enums::{CritSeverity, DodgePosture, ShipSystem};
use crate::types::RangeBand;

/// Target number an attack total must meet or beat to hit.
pub const HIT_THRESHOLD: i32 = 8;

/// Target number a point-defense total must meet or beat to destroy a
/// missile.
pub const POINT_DEFENSE_THRESHOLD: i32 = 8;

/// Base target number for an emergency repair check, before severity
/// scaling.
pub const REPAIR_THRESHOLD: i32 = 8;

// --- Modifier tables ---

/// Attack DM for the current range band (closer = easier).
pub fn range_attack_dm(band: RangeBand) -> i32 {
    match band {
        RangeBand::Adjacent => 2,
        RangeBand::Close => 1,
        RangeBand::Short => 1,
        RangeBand::Medium => 0,
        RangeBand::Long => -2,
        RangeBand::VeryLong => -4,
        RangeBand::Distant => -6,
    }
}

/// DM subtracted from incoming attack totals for the defender's posture.
pub fn dodge_dm(posture: DodgePosture) -> i32 {
    match posture {
        DodgePosture::Steady => 0,
        DodgePosture::Evasive => 1,
        DodgePosture::AllOut => 2,
    }
}

// --- Critical hits ---

/// Hull fraction thresholds; crossing any of them in a single hit
/// triggers a critical effect roll.
pub const CRIT_THRESHOLDS: [f64; 9] = [0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1];

/// Severity for a post-hit hull fraction (lower hull = worse).
pub fn crit_severity(hull_fraction: f64) -> CritSeverity {
    if hull_fraction > 0.6 {
        CritSeverity::Light
    } else if hull_fraction > 0.4 {
        CritSeverity::Moderate
    } else if hull_fraction > 0.2 {
        CritSeverity::Severe
    } else {
        CritSeverity::Critical
    }
}

/// Number of d6 rolled for a critical effect's system damage.
pub fn crit_damage_dice(severity: CritSeverity) -> u32 {
    match severity {
        CritSeverity::Light => 1,
        CritSeverity::Moderate => 1,
        CritSeverity::Severe => 2,
        CritSeverity::Critical => 3,
    }
}

/// Repair target DM for the severity of the effect being repaired.
pub fn crit_repair_dm(severity: CritSeverity) -> i32 {
    match severity {
        CritSeverity::Light => 0,
        CritSeverity::Moderate => 1,
        CritSeverity::Severe => 2,
        CritSeverity::Critical => 3,
    }
}

/// Ship system struck, from a 2d6 location roll.
pub fn crit_location(roll: i32) -> ShipSystem {
    match roll {
        2 => ShipSystem::Sensors,
        3 => ShipSystem::PowerPlant,
        4 => ShipSystem::Fuel,
        5 => ShipSystem::Weapon,
        6 => ShipSystem::Armor,
        7 => ShipSystem::Hull,
        8 => ShipSystem::Maneuver,
        9 => ShipSystem::Cargo,
        10 => ShipSystem::Computer,
        11 => ShipSystem::Crew,
        _ => ShipSystem::Bridge,
    }
}

// --- Countermeasures ---

/// Temporary armor bonus granted by a deployed sand canister. Persists
/// until the owner's next turn begins.
pub const COUNTERMEASURE_ARMOR_BONUS: u32 = 3;

// --- History bounds ---

/// Maximum commands retained in a session's undo history.
pub const COMMAND_HISTORY_CAP: usize = 32;

/// Maximum rounds retained in a session's event log.
pub const ROUND_LOG_CAP: usize = 20;

// --- Turn scheduling ---

/// Artificial delay before a scheduled AI turn executes (milliseconds),
/// letting the preceding outbound events settle on the client side.
pub const AI_REENTRY_DELAY_MS: u64 = 1500;
