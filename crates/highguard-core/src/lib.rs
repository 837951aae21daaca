//! Core types and definitions for the HIGHGUARD combat core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! identifiers, enums, inbound commands, outbound events, reject codes,
//! rules data, ship reference data, and snapshot views. It has no
//! dependency on the engine or any runtime framework.

pub mod commands;
pub mod enums;
pub mod errors;
pub mod events;
pub mod rules;
pub mod ship;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
