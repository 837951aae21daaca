//! Combatant state and ship/weapon reference data.
//!
//! `Combatant` is mutated only by the command layer and by missile impact
//! resolution; everything else reads it. Weapon specs and ship fitting
//! profiles are immutable lookup data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::{AmmoKind, CrewRole, CritSeverity, DodgePosture, ShipSystem};
use crate::types::{CombatantId, RangeBand};

/// Identifier for a weapon in the fixed reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponId {
    PulseLaser,
    BeamLaser,
    MissileRack,
    Sandcaster,
}

/// Immutable weapon reference data.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub id: WeaponId,
    pub name: &'static str,
    /// Damage dice notation (e.g. `2d6`).
    pub damage: &'static str,
    /// Ammunition consumed per use, if any.
    pub ammo: Option<AmmoKind>,
    /// Range bands the weapon can engage at; `None` = unrestricted.
    pub ranges: Option<&'static [RangeBand]>,
    /// Whether the weapon resolves through the direct-fire attack roll.
    pub direct_fire: bool,
}

const BEAM_LASER_RANGES: &[RangeBand] = &[
    RangeBand::Adjacent,
    RangeBand::Close,
    RangeBand::Short,
    RangeBand::Medium,
];

impl WeaponId {
    /// Look up the immutable spec for this weapon.
    pub fn spec(self) -> WeaponSpec {
        match self {
            WeaponId::PulseLaser => WeaponSpec {
                id: self,
                name: "Pulse Laser",
                damage: "2d6",
                ammo: None,
                ranges: None,
                direct_fire: true,
            },
            WeaponId::BeamLaser => WeaponSpec {
                id: self,
                name: "Beam Laser",
                damage: "1d6+2",
                ammo: None,
                ranges: Some(BEAM_LASER_RANGES),
                direct_fire: true,
            },
            WeaponId::MissileRack => WeaponSpec {
                id: self,
                name: "Missile Rack",
                damage: "2d6",
                ammo: Some(AmmoKind::Missiles),
                ranges: None,
                direct_fire: false,
            },
            WeaponId::Sandcaster => WeaponSpec {
                id: self,
                name: "Sandcaster",
                damage: "0d6",
                ammo: Some(AmmoKind::Sand),
                ranges: None,
                direct_fire: false,
            },
        }
    }
}

/// A critical hit effect accumulated on a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalHit {
    pub system: ShipSystem,
    pub severity: CritSeverity,
    pub damage: u32,
}

/// Hull class of a combatant's ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    #[default]
    Scout,
    FarTrader,
    PatrolCorvette,
    Corsair,
}

/// Per-class fitting: starting hull, armor, turrets, loadout, skills.
#[derive(Debug, Clone)]
pub struct ShipProfile {
    pub hull: u32,
    pub armor: u32,
    pub turrets: u32,
    pub missiles: u32,
    pub sand: u32,
    pub weapons: &'static [WeaponId],
    pub pilot: i32,
    pub gunner: i32,
    pub engineer: i32,
}

/// Get the fitting profile for a ship class.
pub fn ship_profile(class: ShipClass) -> ShipProfile {
    match class {
        ShipClass::Scout => ShipProfile {
            hull: 24,
            armor: 2,
            turrets: 1,
            missiles: 6,
            sand: 6,
            weapons: &[WeaponId::PulseLaser, WeaponId::MissileRack, WeaponId::Sandcaster],
            pilot: 1,
            gunner: 1,
            engineer: 1,
        },
        ShipClass::FarTrader => ShipProfile {
            hull: 32,
            armor: 1,
            turrets: 1,
            missiles: 4,
            sand: 10,
            weapons: &[WeaponId::BeamLaser, WeaponId::MissileRack, WeaponId::Sandcaster],
            pilot: 1,
            gunner: 0,
            engineer: 2,
        },
        ShipClass::PatrolCorvette => ShipProfile {
            hull: 40,
            armor: 4,
            turrets: 2,
            missiles: 12,
            sand: 8,
            weapons: &[
                WeaponId::BeamLaser,
                WeaponId::PulseLaser,
                WeaponId::MissileRack,
                WeaponId::Sandcaster,
            ],
            pilot: 2,
            gunner: 2,
            engineer: 1,
        },
        ShipClass::Corsair => ShipProfile {
            hull: 36,
            armor: 3,
            turrets: 3,
            missiles: 10,
            sand: 4,
            weapons: &[
                WeaponId::PulseLaser,
                WeaponId::BeamLaser,
                WeaponId::MissileRack,
                WeaponId::Sandcaster,
            ],
            pilot: 1,
            gunner: 2,
            engineer: 0,
        },
    }
}

/// One party's ship state within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub class: ShipClass,
    pub hull: u32,
    pub max_hull: u32,
    pub armor: u32,
    pub turrets: u32,
    pub missiles: u32,
    pub sand: u32,
    pub weapons: Vec<WeaponId>,
    /// Accumulated critical effects, oldest first.
    pub criticals: Vec<CriticalHit>,
    pub skills: HashMap<CrewRole, i32>,
    pub dodge: DodgePosture,
    /// Temporary armor from a deployed countermeasure; cleared when the
    /// owner's next turn begins.
    pub countermeasure_bonus: u32,
}

impl Combatant {
    /// Build a combatant from its class fitting profile.
    pub fn new(id: CombatantId, class: ShipClass) -> Self {
        let profile = ship_profile(class);
        let mut skills = HashMap::new();
        skills.insert(CrewRole::Pilot, profile.pilot);
        skills.insert(CrewRole::Gunner, profile.gunner);
        skills.insert(CrewRole::Engineer, profile.engineer);
        Self {
            id,
            class,
            hull: profile.hull,
            max_hull: profile.hull,
            armor: profile.armor,
            turrets: profile.turrets,
            missiles: profile.missiles,
            sand: profile.sand,
            weapons: profile.weapons.to_vec(),
            criticals: Vec::new(),
            skills,
            dodge: DodgePosture::Steady,
            countermeasure_bonus: 0,
        }
    }

    /// Skill value for a crew role, zero when unstaffed.
    pub fn skill(&self, role: CrewRole) -> i32 {
        self.skills.get(&role).copied().unwrap_or(0)
    }

    /// Current hull as a fraction of maximum.
    pub fn hull_fraction(&self) -> f64 {
        if self.max_hull == 0 {
            0.0
        } else {
            self.hull as f64 / self.max_hull as f64
        }
    }

    /// Weapon at a fitting index, if any.
    pub fn weapon_at(&self, index: usize) -> Option<WeaponId> {
        self.weapons.get(index).copied()
    }

    /// Whether a weapon of the given id is fitted.
    pub fn fitted(&self, id: WeaponId) -> bool {
        self.weapons.contains(&id)
    }

    /// Remaining ammunition of a kind.
    pub fn ammo(&self, kind: AmmoKind) -> u32 {
        match kind {
            AmmoKind::Missiles => self.missiles,
            AmmoKind::Sand => self.sand,
        }
    }

    /// Spend one round of ammunition. Callers validate availability first.
    pub fn spend_ammo(&mut self, kind: AmmoKind) {
        match kind {
            AmmoKind::Missiles => self.missiles = self.missiles.saturating_sub(1),
            AmmoKind::Sand => self.sand = self.sand.saturating_sub(1),
        }
    }
}
