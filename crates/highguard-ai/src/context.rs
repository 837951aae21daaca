//! Decision context — read-only inputs to a strategy decision.
//!
//! Built fresh from a session snapshot for every decision; strategies
//! never mutate it and never see live session state.

use highguard_core::ship::WeaponId;
use highguard_core::state::SessionSnapshot;
use highguard_core::types::{CombatantId, RangeBand};

/// Snapshot-derived inputs for one decision.
#[derive(Debug, Clone)]
pub struct DecisionContext {
    pub me: CombatantId,
    pub round: u32,
    pub range: RangeBand,
    /// Own hull as a fraction of maximum.
    pub hull_fraction: f64,
    pub missiles_ammo: u32,
    pub sand_ammo: u32,
    pub has_missile_rack: bool,
    pub has_sandcaster: bool,
    pub turrets: u32,
    /// Ids of missiles in flight toward this combatant, nearest first.
    pub incoming: Vec<u32>,
    /// Fitting index of a direct-fire weapon usable at the current range.
    pub direct_fire_index: Option<usize>,
}

impl DecisionContext {
    /// Build the context for the given party from a session snapshot.
    pub fn from_snapshot(snapshot: &SessionSnapshot, me: CombatantId) -> Self {
        let view = snapshot
            .combatants
            .iter()
            .find(|c| c.id == me)
            .cloned()
            .unwrap_or_else(|| {
                // Unknown party: an empty view yields EndTurn decisions.
                highguard_core::state::CombatantView {
                    id: me,
                    class: Default::default(),
                    hull: 0,
                    max_hull: 0,
                    armor: 0,
                    turrets: 0,
                    missiles: 0,
                    sand: 0,
                    weapons: Vec::new(),
                    criticals: Vec::new(),
                    dodge: Default::default(),
                    countermeasure_bonus: 0,
                    turn_complete: false,
                    strategy: None,
                }
            });

        let mut incoming: Vec<_> = snapshot
            .missiles
            .iter()
            .filter(|m| m.target == me)
            .collect();
        incoming.sort_by_key(|m| m.range);
        let incoming = incoming.iter().map(|m| m.id).collect();

        let direct_fire_index = view.weapons.iter().position(|w| {
            let spec = w.spec();
            spec.direct_fire
                && spec
                    .ranges
                    .map(|bands| bands.contains(&snapshot.range))
                    .unwrap_or(true)
        });

        let hull_fraction = if view.max_hull == 0 {
            0.0
        } else {
            view.hull as f64 / view.max_hull as f64
        };

        Self {
            me,
            round: snapshot.round,
            range: snapshot.range,
            hull_fraction,
            missiles_ammo: view.missiles,
            sand_ammo: view.sand,
            has_missile_rack: view.weapons.contains(&WeaponId::MissileRack),
            has_sandcaster: view.weapons.contains(&WeaponId::Sandcaster),
            turrets: view.turrets,
            incoming,
            direct_fire_index,
        }
    }
}
