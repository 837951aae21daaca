//! Fundamental identifier and distance types.

use serde::{Deserialize, Serialize};

/// Unique identifier for a combat session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SessionId(pub u64);

/// Unique identifier for a combatant (one party in a session).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CombatantId(pub u32);

/// Ordinal distance category between the two ships.
///
/// Bands derive attack modifiers and drive missile closure: a missile in
/// flight closes one band per round until it reaches `Adjacent`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RangeBand {
    Adjacent,
    Close,
    #[default]
    Short,
    Medium,
    Long,
    VeryLong,
    Distant,
}

impl RangeBand {
    /// All bands, nearest first.
    pub const ALL: [RangeBand; 7] = [
        RangeBand::Adjacent,
        RangeBand::Close,
        RangeBand::Short,
        RangeBand::Medium,
        RangeBand::Long,
        RangeBand::VeryLong,
        RangeBand::Distant,
    ];

    /// One band closer to `Adjacent` (saturating).
    pub fn closer(self) -> RangeBand {
        match self {
            RangeBand::Adjacent => RangeBand::Adjacent,
            RangeBand::Close => RangeBand::Adjacent,
            RangeBand::Short => RangeBand::Close,
            RangeBand::Medium => RangeBand::Short,
            RangeBand::Long => RangeBand::Medium,
            RangeBand::VeryLong => RangeBand::Long,
            RangeBand::Distant => RangeBand::VeryLong,
        }
    }

    /// Number of bands between this band and `Adjacent`.
    pub fn bands_to_adjacent(self) -> u32 {
        match self {
            RangeBand::Adjacent => 0,
            RangeBand::Close => 1,
            RangeBand::Short => 2,
            RangeBand::Medium => 3,
            RangeBand::Long => 4,
            RangeBand::VeryLong => 5,
            RangeBand::Distant => 6,
        }
    }

    /// Whether this band is `Long` or farther out.
    pub fn is_long_or_farther(self) -> bool {
        self >= RangeBand::Long
    }
}
