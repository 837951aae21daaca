//! Strategy-specific parameter profiles.
//!
//! Consolidates the per-strategy weights the decision ladder applies.

use highguard_core::enums::{DodgePosture, StrategyKind};

/// Tunable parameters for one decision strategy.
#[derive(Debug, Clone, Copy)]
pub struct StrategyProfile {
    /// Probability of attempting point defense when missiles are inbound.
    pub point_defense_chance: f64,
    /// Probability of deploying a countermeasure when damaged.
    pub countermeasure_chance: f64,
    /// Hull fraction below which countermeasures are considered.
    pub countermeasure_hull_threshold: f64,
    /// Probability of taking an evasive posture.
    pub dodge_chance: f64,
    /// Posture taken when the dodge tier fires.
    pub dodge_posture: DodgePosture,
}

/// Get the parameter profile for a strategy.
pub fn profile(strategy: StrategyKind) -> StrategyProfile {
    match strategy {
        StrategyKind::Balanced => StrategyProfile {
            point_defense_chance: 0.50,
            countermeasure_chance: 0.25,
            countermeasure_hull_threshold: 0.50,
            dodge_chance: 0.15,
            dodge_posture: DodgePosture::Evasive,
        },
        StrategyKind::Aggressive => StrategyProfile {
            point_defense_chance: 0.20,
            countermeasure_chance: 0.10,
            countermeasure_hull_threshold: 0.30,
            dodge_chance: 0.05,
            dodge_posture: DodgePosture::Evasive,
        },
        StrategyKind::Defensive => StrategyProfile {
            point_defense_chance: 0.80,
            countermeasure_chance: 0.50,
            countermeasure_hull_threshold: 0.70,
            dodge_chance: 0.35,
            dodge_posture: DodgePosture::AllOut,
        },
        StrategyKind::Cautious => StrategyProfile {
            point_defense_chance: 0.60,
            countermeasure_chance: 0.40,
            countermeasure_hull_threshold: 0.60,
            dodge_chance: 0.25,
            dodge_posture: DodgePosture::Evasive,
        },
    }
}

/// Recommend a strategy for the current hull fraction. A hint for
/// configuration only, never forced.
pub fn suggest_strategy(hull_fraction: f64) -> StrategyKind {
    if hull_fraction < 0.30 {
        StrategyKind::Defensive
    } else if hull_fraction > 0.80 {
        StrategyKind::Aggressive
    } else {
        StrategyKind::Balanced
    }
}
