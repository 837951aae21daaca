//! Attack resolution — pure functions from combat inputs to results.
//!
//! The resolver never mutates combatants; callers apply the reported
//! damage and append any critical effect.

use highguard_core::enums::{CrewRole, DodgePosture};
use highguard_core::errors::EngineError;
use highguard_core::rules;
use highguard_core::ship::{Combatant, CriticalHit, WeaponSpec};
use highguard_core::types::RangeBand;

use crate::dice::{self, Dice, RollResult};

/// Inputs to a single attack resolution.
#[derive(Debug, Clone)]
pub struct AttackSpec<'a> {
    pub range: RangeBand,
    pub dodge: DodgePosture,
    pub weapon: &'a WeaponSpec,
    /// Target number the attack total must meet or beat.
    pub threshold: i32,
}

/// Outcome of a single attack resolution.
#[derive(Debug, Clone)]
pub struct AttackResult {
    pub hit: bool,
    pub attack_roll: RollResult,
    /// 2d6 + gunnery + range DM - dodge DM.
    pub attack_total: i32,
    /// Damage after armor and countermeasure absorption, zero-floored.
    /// Zero on a miss.
    pub damage: u32,
    /// Defender hull after applying `damage`. The caller writes this
    /// back; the resolver does not.
    pub new_hull: u32,
}

/// Outcome of a missile impact resolution (no to-hit roll).
#[derive(Debug, Clone)]
pub struct ImpactResult {
    pub damage: u32,
    pub new_hull: u32,
}

/// Resolve one direct-fire attack.
///
/// Hit when `2d6 + gunnery + range DM - dodge DM >= threshold`. On a
/// hit, weapon damage dice minus (armor + countermeasure bonus),
/// floored at zero. Range-restriction checks belong to the caller's
/// validation, not here.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &Combatant,
    spec: &AttackSpec,
    dice: &mut Dice,
) -> Result<AttackResult, EngineError> {
    let attack_roll = dice.roll_2d6();
    let attack_total = attack_roll.total
        + attacker.skill(CrewRole::Gunner)
        + rules::range_attack_dm(spec.range)
        - rules::dodge_dm(spec.dodge);
    let hit = attack_total >= spec.threshold;

    if !hit {
        return Ok(AttackResult {
            hit: false,
            attack_roll,
            attack_total,
            damage: 0,
            new_hull: defender.hull,
        });
    }

    let expr = dice::parse(spec.weapon.damage)?;
    let raw = dice.roll_expr(&expr).total.max(0) as u32;
    let absorbed = defender.armor + defender.countermeasure_bonus;
    let damage = raw.saturating_sub(absorbed);
    let new_hull = defender.hull.saturating_sub(damage);

    Ok(AttackResult {
        hit: true,
        attack_roll,
        attack_total,
        damage,
        new_hull,
    })
}

/// Resolve a missile impact: damage dice minus armor (and countermeasure
/// bonus), no to-hit roll — a missile that reaches impact always
/// connects unless intercepted first.
pub fn resolve_impact(
    defender: &Combatant,
    damage_notation: &str,
    dice: &mut Dice,
) -> Result<ImpactResult, EngineError> {
    let expr = dice::parse(damage_notation)?;
    let raw = dice.roll_expr(&expr).total.max(0) as u32;
    let absorbed = defender.armor + defender.countermeasure_bonus;
    let damage = raw.saturating_sub(absorbed);
    let new_hull = defender.hull.saturating_sub(damage);
    Ok(ImpactResult { damage, new_hull })
}

/// Roll a critical effect if a hit that moved hull from `before` to
/// `after` crossed any fractional threshold. Location comes from a 2d6
/// table; severity scales with the remaining hull fraction.
pub fn roll_critical(
    before: u32,
    after: u32,
    max_hull: u32,
    dice: &mut Dice,
) -> Option<CriticalHit> {
    if max_hull == 0 || after >= before {
        return None;
    }
    let before_fraction = before as f64 / max_hull as f64;
    let after_fraction = after as f64 / max_hull as f64;
    let crossed = rules::CRIT_THRESHOLDS
        .iter()
        .any(|t| before_fraction > *t && after_fraction <= *t);
    if !crossed {
        return None;
    }

    let location = dice.roll_2d6();
    let severity = rules::crit_severity(after_fraction);
    let damage = dice.roll(rules::crit_damage_dice(severity), 6).total.max(0) as u32;
    Some(CriticalHit {
        system: rules::crit_location(location.total),
        severity,
        damage,
    })
}
