//! The strategy decision ladder.
//!
//! Every tier consumes exactly one uniform draw and falls through to the
//! next on a miss, so strategies are statistically distinguishable under
//! repeated sampling while no single decision is predictable.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use highguard_core::commands::CombatCommand;
use highguard_core::enums::StrategyKind;

use crate::context::DecisionContext;
use crate::profiles::profile;

/// Produce exactly one action for the given context and strategy.
pub fn decide(
    ctx: &DecisionContext,
    strategy: StrategyKind,
    rng: &mut ChaCha8Rng,
) -> CombatCommand {
    let profile = profile(strategy);

    // Tier 1: point defense against the nearest incoming missile.
    if !ctx.incoming.is_empty()
        && ctx.turrets > 0
        && rng.gen::<f64>() < profile.point_defense_chance
    {
        return CombatCommand::PointDefense {
            missile_id: ctx.incoming[0],
        };
    }

    // Tier 2: countermeasure deployment when damaged.
    if ctx.hull_fraction < profile.countermeasure_hull_threshold
        && ctx.has_sandcaster
        && ctx.sand_ammo > 0
        && rng.gen::<f64>() < profile.countermeasure_chance
    {
        return CombatCommand::UseCountermeasure;
    }

    // Tier 3: evasive maneuver.
    if rng.gen::<f64>() < profile.dodge_chance {
        return CombatCommand::Dodge {
            posture: profile.dodge_posture,
        };
    }

    // Tier 4: weapon fire. Missiles are preferred at Long range and
    // beyond; otherwise direct fire, with missiles as the fallback when
    // no direct-fire weapon reaches.
    if ctx.range.is_long_or_farther() && ctx.has_missile_rack && ctx.missiles_ammo > 0 {
        return CombatCommand::LaunchMissile;
    }
    if let Some(weapon_index) = ctx.direct_fire_index {
        return CombatCommand::Fire { weapon_index };
    }
    if ctx.has_missile_rack && ctx.missiles_ammo > 0 {
        return CombatCommand::LaunchMissile;
    }

    CombatCommand::EndTurn
}
