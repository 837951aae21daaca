#[cfg(test)]
mod tests {
    use crate::commands::CombatCommand;
    use crate::enums::*;
    use crate::errors::RejectReason;
    use crate::events::{Audience, CombatEvent, Outbound, PartyHull};
    use crate::rules;
    use crate::ship::{ship_profile, Combatant, ShipClass, WeaponId};
    use crate::types::{CombatantId, RangeBand};

    /// Verify all wire enums round-trip through serde_json.
    #[test]
    fn test_session_phase_serde() {
        let variants = vec![
            SessionPhase::AwaitingPlayers,
            SessionPhase::Active,
            SessionPhase::Victory,
            SessionPhase::Forfeited,
            SessionPhase::Abandoned,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: SessionPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_range_band_serde_and_order() {
        for v in RangeBand::ALL {
            let json = serde_json::to_string(&v).unwrap();
            let back: RangeBand = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
        assert!(RangeBand::Adjacent < RangeBand::Distant);
        assert!(RangeBand::Long.is_long_or_farther());
        assert!(!RangeBand::Medium.is_long_or_farther());
    }

    #[test]
    fn test_range_band_closer_saturates() {
        assert_eq!(RangeBand::Distant.closer(), RangeBand::VeryLong);
        assert_eq!(RangeBand::Close.closer(), RangeBand::Adjacent);
        assert_eq!(RangeBand::Adjacent.closer(), RangeBand::Adjacent);
        assert_eq!(RangeBand::Long.bands_to_adjacent(), 4);
        assert_eq!(RangeBand::Adjacent.bands_to_adjacent(), 0);
    }

    /// Verify CombatCommand round-trips through serde (tagged union).
    #[test]
    fn test_combat_command_serde() {
        let commands = vec![
            CombatCommand::Fire { weapon_index: 0 },
            CombatCommand::LaunchMissile,
            CombatCommand::PointDefense { missile_id: 7 },
            CombatCommand::UseCountermeasure,
            CombatCommand::Dodge {
                posture: DodgePosture::AllOut,
            },
            CombatCommand::Repair,
            CombatCommand::EndTurn,
            CombatCommand::Abandon,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: CombatCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
    }

    /// Verify CombatEvent round-trips through serde.
    #[test]
    fn test_combat_event_serde() {
        let events = vec![
            CombatEvent::TurnChange {
                active_party: CombatantId(1),
                round: 3,
            },
            CombatEvent::AttackResult {
                hit: true,
                damage: Some(4),
                target_hull: 20,
            },
            CombatEvent::MissileLaunched {
                missile_id: 1,
                attacker: CombatantId(1),
                defender: CombatantId(2),
                current_range: RangeBand::Long,
                ammo_remaining: 5,
            },
            CombatEvent::PointDefenseResult {
                missile_id: 1,
                destroyed: true,
                roll: 9,
                total: 11,
            },
            CombatEvent::CombatEnd {
                winner: CombatantId(1),
                loser: CombatantId(2),
                reason: Some(EndReason::OpponentDisconnected),
                final_hulls: vec![
                    PartyHull {
                        party: CombatantId(1),
                        hull: 12,
                    },
                    PartyHull {
                        party: CombatantId(2),
                        hull: 0,
                    },
                ],
                rounds: 6,
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: CombatEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    /// End reasons use snake_case wire codes.
    #[test]
    fn test_end_reason_wire_code() {
        let json = serde_json::to_string(&EndReason::OpponentDisconnected).unwrap();
        assert_eq!(json, "\"opponent_disconnected\"");
    }

    /// Reject codes are stable snake_case strings.
    #[test]
    fn test_reject_reason_codes() {
        assert_eq!(RejectReason::NotYourTurn.code(), "not_your_turn");
        assert_eq!(RejectReason::AlreadyActed.code(), "already_acted");
        assert_eq!(RejectReason::NoWeapon.code(), "no_weapon");
        assert_eq!(RejectReason::OutOfRange.code(), "out_of_range");
        assert_eq!(
            RejectReason::InsufficientAmmo {
                kind: AmmoKind::Missiles
            }
            .code(),
            "insufficient_missiles"
        );
        assert_eq!(
            RejectReason::InsufficientAmmo {
                kind: AmmoKind::Sand
            }
            .code(),
            "insufficient_sand"
        );
        assert_eq!(RejectReason::NoTarget.code(), "no_target");
    }

    #[test]
    fn test_outbound_audience_helpers() {
        let broadcast = Outbound::both(CombatEvent::TurnChange {
            active_party: CombatantId(1),
            round: 1,
        });
        assert_eq!(broadcast.audience, Audience::Both);

        let single = Outbound::to(
            CombatantId(2),
            CombatEvent::Rejected {
                reason: RejectReason::NotYourTurn,
            },
        );
        assert_eq!(single.audience, Audience::Party(CombatantId(2)));
    }

    /// Range DM table: closer bands are easier, longer are harder.
    #[test]
    fn test_range_attack_dm_monotonic() {
        let mut previous = i32::MAX;
        for band in RangeBand::ALL {
            let dm = rules::range_attack_dm(band);
            assert!(dm <= previous, "DM must not improve with distance");
            previous = dm;
        }
        assert_eq!(rules::range_attack_dm(RangeBand::Medium), 0);
    }

    #[test]
    fn test_crit_severity_scales_with_hull() {
        assert_eq!(rules::crit_severity(0.9), CritSeverity::Light);
        assert_eq!(rules::crit_severity(0.5), CritSeverity::Moderate);
        assert_eq!(rules::crit_severity(0.3), CritSeverity::Severe);
        assert_eq!(rules::crit_severity(0.1), CritSeverity::Critical);
    }

    #[test]
    fn test_crit_location_covers_2d6() {
        for roll in 2..=12 {
            // Must map every possible 2d6 total without panicking.
            let _ = rules::crit_location(roll);
        }
    }

    /// Ship profiles produce playable combatants.
    #[test]
    fn test_combatant_from_profile() {
        for class in [
            ShipClass::Scout,
            ShipClass::FarTrader,
            ShipClass::PatrolCorvette,
            ShipClass::Corsair,
        ] {
            let profile = ship_profile(class);
            let combatant = Combatant::new(CombatantId(9), class);
            assert_eq!(combatant.hull, profile.hull);
            assert_eq!(combatant.hull, combatant.max_hull);
            assert!(combatant.fitted(WeaponId::Sandcaster));
            assert!(combatant.fitted(WeaponId::MissileRack));
            assert!(combatant.turrets > 0);
            assert_eq!(combatant.skill(CrewRole::Gunner), profile.gunner);
            assert!((combatant.hull_fraction() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_weapon_specs() {
        let pulse = WeaponId::PulseLaser.spec();
        assert!(pulse.direct_fire);
        assert!(pulse.ranges.is_none());

        let beam = WeaponId::BeamLaser.spec();
        assert!(beam.direct_fire);
        let ranges = beam.ranges.unwrap();
        assert!(ranges.contains(&RangeBand::Medium));
        assert!(!ranges.contains(&RangeBand::Long));

        let rack = WeaponId::MissileRack.spec();
        assert!(!rack.direct_fire);
        assert_eq!(rack.ammo, Some(AmmoKind::Missiles));
    }

    #[test]
    fn test_ammo_spend() {
        let mut combatant = Combatant::new(CombatantId(1), ShipClass::Scout);
        let before = combatant.ammo(AmmoKind::Missiles);
        combatant.spend_ammo(AmmoKind::Missiles);
        assert_eq!(combatant.ammo(AmmoKind::Missiles), before - 1);
    }
}
