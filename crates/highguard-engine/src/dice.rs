//! Seeded dice source.
//!
//! Every roll comes from a `ChaCha8Rng` seeded at session creation, so a
//! session replayed with the same seed reproduces identical dice and the
//! server can re-derive any client-reported roll.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use highguard_core::errors::EngineError;

/// A parsed dice expression: `count` dice of `sides`, plus a flat
/// modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

/// The outcome of a single roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollResult {
    /// Individual die faces, in roll order.
    pub dice: Vec<u32>,
    /// Sum of faces plus any expression modifier.
    pub total: i32,
    /// The seed the owning source was created with.
    pub seed: u64,
}

/// Deterministic dice source for one session.
#[derive(Debug, Clone)]
pub struct Dice {
    seed: u64,
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Roll `count` dice with `sides` faces each.
    pub fn roll(&mut self, count: u32, sides: u32) -> RollResult {
        let sides = sides.max(1);
        let dice: Vec<u32> = (0..count).map(|_| self.rng.gen_range(1..=sides)).collect();
        let total = dice.iter().sum::<u32>() as i32;
        RollResult {
            dice,
            total,
            seed: self.seed,
        }
    }

    /// Roll 2d6, the standard check roll.
    pub fn roll_2d6(&mut self) -> RollResult {
        self.roll(2, 6)
    }

    /// Roll a parsed expression, applying its flat modifier.
    pub fn roll_expr(&mut self, expr: &DiceExpr) -> RollResult {
        let mut result = self.roll(expr.count, expr.sides.max(1));
        result.total += expr.modifier;
        result
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw generator access for single uniform draws (AI tiers).
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

/// Parse `NdM` notation with an optional `+K`/`-K` flat modifier
/// (`2d6`, `1d6+2`, `3d6-1`). Malformed notation is an error, never a
/// silent default.
pub fn parse(notation: &str) -> Result<DiceExpr, EngineError> {
    let invalid = || EngineError::InvalidNotation(notation.to_string());

    let (count_part, rest) = notation.split_once(['d', 'D']).ok_or_else(invalid)?;
    let (sides_part, modifier) = if let Some((sides, flat)) = rest.split_once('+') {
        (sides, flat.parse::<i32>().map_err(|_| invalid())?)
    } else if let Some((sides, flat)) = rest.split_once('-') {
        (sides, -flat.parse::<i32>().map_err(|_| invalid())?)
    } else {
        (rest, 0)
    };

    let count: u32 = count_part.trim().parse().map_err(|_| invalid())?;
    let sides: u32 = sides_part.trim().parse().map_err(|_| invalid())?;
    if sides == 0 {
        return Err(invalid());
    }
    Ok(DiceExpr {
        count,
        sides,
        modifier,
    })
}
