//! Opponent decision engine for HIGHGUARD.
//!
//! Implements strategy-selectable decision policies: each strategy is a
//! parameter profile applied by one shared priority ladder, operating on
//! a read-only context built from a session snapshot.

pub mod context;
pub mod decide;
pub mod profiles;

pub use context::DecisionContext;
pub use decide::decide;
pub use highguard_core as core;

#[cfg(test)]
mod tests;
