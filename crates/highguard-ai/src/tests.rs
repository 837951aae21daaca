#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use highguard_core::commands::CombatCommand;
    use highguard_core::enums::StrategyKind;
    use highguard_core::types::{CombatantId, RangeBand};

    use crate::context::DecisionContext;
    use crate::decide::decide;
    use crate::profiles::{profile, suggest_strategy};

    fn make_context(
        range: RangeBand,
        hull_fraction: f64,
        incoming: Vec<u32>,
        missiles_ammo: u32,
        sand_ammo: u32,
    ) -> DecisionContext {
        DecisionContext {
            me: CombatantId(2),
            round: 3,
            range,
            hull_fraction,
            missiles_ammo,
            sand_ammo,
            has_missile_rack: true,
            has_sandcaster: true,
            turrets: 1,
            incoming,
            direct_fire_index: Some(0),
        }
    }

    fn sample(
        ctx: &DecisionContext,
        strategy: StrategyKind,
        trials: u32,
    ) -> Vec<CombatCommand> {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        (0..trials).map(|_| decide(ctx, strategy, &mut rng)).collect()
    }

    // ---- Ladder gating ----

    #[test]
    fn test_no_point_defense_without_incoming() {
        let ctx = make_context(RangeBand::Short, 1.0, vec![], 6, 6);
        for command in sample(&ctx, StrategyKind::Defensive, 50) {
            assert!(
                !matches!(command, CombatCommand::PointDefense { .. }),
                "point defense requires an incoming missile"
            );
        }
    }

    #[test]
    fn test_no_countermeasure_at_full_hull() {
        let ctx = make_context(RangeBand::Short, 1.0, vec![], 6, 6);
        for command in sample(&ctx, StrategyKind::Defensive, 50) {
            assert!(!matches!(command, CombatCommand::UseCountermeasure));
        }
    }

    #[test]
    fn test_no_countermeasure_without_sand() {
        let ctx = make_context(RangeBand::Short, 0.2, vec![], 6, 0);
        for command in sample(&ctx, StrategyKind::Defensive, 50) {
            assert!(!matches!(command, CombatCommand::UseCountermeasure));
        }
    }

    #[test]
    fn test_point_defense_targets_nearest_missile() {
        // Incoming list is ordered nearest first by the context builder.
        let ctx = make_context(RangeBand::Short, 1.0, vec![4, 9], 6, 6);
        let picked = sample(&ctx, StrategyKind::Defensive, 50)
            .into_iter()
            .find_map(|c| match c {
                CombatCommand::PointDefense { missile_id } => Some(missile_id),
                _ => None,
            });
        assert_eq!(picked, Some(4));
    }

    // ---- Fire preferences ----

    #[test]
    fn test_fire_prefers_missiles_at_long_range() {
        let ctx = make_context(RangeBand::Long, 1.0, vec![], 6, 6);
        let fired = sample(&ctx, StrategyKind::Aggressive, 50)
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    CombatCommand::LaunchMissile | CombatCommand::Fire { .. }
                )
            })
            .collect::<Vec<_>>();
        assert!(!fired.is_empty());
        for command in fired {
            assert_eq!(command, CombatCommand::LaunchMissile);
        }
    }

    #[test]
    fn test_fire_uses_direct_fire_when_close() {
        let ctx = make_context(RangeBand::Close, 1.0, vec![], 6, 6);
        let fired = sample(&ctx, StrategyKind::Aggressive, 50)
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    CombatCommand::LaunchMissile | CombatCommand::Fire { .. }
                )
            })
            .collect::<Vec<_>>();
        assert!(!fired.is_empty());
        for command in fired {
            assert_eq!(command, CombatCommand::Fire { weapon_index: 0 });
        }
    }

    #[test]
    fn test_falls_back_to_missiles_without_direct_fire() {
        let mut ctx = make_context(RangeBand::Close, 1.0, vec![], 6, 6);
        ctx.direct_fire_index = None;
        let commands = sample(&ctx, StrategyKind::Aggressive, 50);
        assert!(commands.contains(&CombatCommand::LaunchMissile));
    }

    #[test]
    fn test_ends_turn_with_nothing_usable() {
        let mut ctx = make_context(RangeBand::Close, 1.0, vec![], 0, 0);
        ctx.direct_fire_index = None;
        ctx.has_missile_rack = false;
        ctx.has_sandcaster = false;
        for command in sample(&ctx, StrategyKind::Aggressive, 50) {
            assert!(matches!(
                command,
                CombatCommand::EndTurn | CombatCommand::Dodge { .. }
            ));
        }
    }

    // ---- Statistical behavior over repeated sampling ----

    #[test]
    fn test_defensive_majority_point_defense_under_missile_threat() {
        let ctx = make_context(RangeBand::Medium, 1.0, vec![11], 6, 6);
        let commands = sample(&ctx, StrategyKind::Defensive, 40);
        let pd = commands
            .iter()
            .filter(|c| matches!(c, CombatCommand::PointDefense { .. }))
            .count();
        assert!(
            pd * 2 > commands.len(),
            "defensive should point-defend in a majority of trials, got {pd}/40"
        );
    }

    #[test]
    fn test_aggressive_fires_in_large_majority_of_trials() {
        let ctx = make_context(RangeBand::Short, 1.0, vec![], 6, 6);
        let commands = sample(&ctx, StrategyKind::Aggressive, 40);
        let fired = commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    CombatCommand::Fire { .. } | CombatCommand::LaunchMissile
                )
            })
            .count();
        assert!(
            fired * 4 >= commands.len() * 3,
            "aggressive should fire in a large majority of trials, got {fired}/40"
        );
    }

    #[test]
    fn test_defensive_dodges_more_than_aggressive() {
        let ctx = make_context(RangeBand::Short, 1.0, vec![], 0, 6);
        let count_dodges = |strategy| {
            sample(&ctx, strategy, 200)
                .iter()
                .filter(|c| matches!(c, CombatCommand::Dodge { .. }))
                .count()
        };
        let defensive = count_dodges(StrategyKind::Defensive);
        let aggressive = count_dodges(StrategyKind::Aggressive);
        assert!(
            defensive > aggressive,
            "defensive dodged {defensive}, aggressive {aggressive}"
        );
    }

    // ---- Profiles ----

    #[test]
    fn test_profile_bounds() {
        for strategy in [
            StrategyKind::Balanced,
            StrategyKind::Aggressive,
            StrategyKind::Defensive,
            StrategyKind::Cautious,
        ] {
            let p = profile(strategy);
            assert!((0.20..=0.80).contains(&p.point_defense_chance));
            assert!((0.10..=0.50).contains(&p.countermeasure_chance));
            assert!(p.dodge_chance > 0.0 && p.dodge_chance < 1.0);
        }
    }

    #[test]
    fn test_suggest_strategy_thresholds() {
        assert_eq!(suggest_strategy(0.10), StrategyKind::Defensive);
        assert_eq!(suggest_strategy(0.29), StrategyKind::Defensive);
        assert_eq!(suggest_strategy(0.50), StrategyKind::Balanced);
        assert_eq!(suggest_strategy(0.81), StrategyKind::Aggressive);
    }

    // ---- Determinism ----

    #[test]
    fn test_same_seed_same_decisions() {
        let ctx = make_context(RangeBand::Medium, 0.4, vec![3], 4, 2);
        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..30 {
            let a = decide(&ctx, StrategyKind::Cautious, &mut rng_a);
            let b = decide(&ctx, StrategyKind::Cautious, &mut rng_b);
            assert_eq!(a, b);
        }
    }
}
