//! Reject reasons and structural errors.
//!
//! Expected precondition failures are data, not errors: validation reports
//! them as `RejectReason` values without unwinding and without any state
//! change. `EngineError` covers structural failures only (malformed input,
//! unknown references).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::AmmoKind;
use crate::types::{CombatantId, SessionId};

/// Stable reason code for a rejected command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// It is not the sender's turn.
    NotYourTurn,
    /// The sender already acted this round.
    AlreadyActed,
    /// No such weapon is fitted, or the weapon cannot perform this action.
    NoWeapon,
    /// The weapon cannot engage at the current range band.
    OutOfRange,
    /// Not enough ammunition of the required kind.
    InsufficientAmmo { kind: AmmoKind },
    /// The referenced target does not exist (or is already gone).
    NoTarget,
    /// Hull is full and no critical effects remain to repair.
    NothingToRepair,
    /// The session is not accepting actions (awaiting players or ended).
    SessionNotActive,
    /// The action failed unexpectedly during execution; state is unchanged.
    ExecutionFailed,
}

impl RejectReason {
    /// Stable wire code (e.g. `insufficient_missiles`), the form
    /// collaborators localize or branch on.
    pub fn code(&self) -> String {
        match self {
            RejectReason::NotYourTurn => "not_your_turn".to_string(),
            RejectReason::AlreadyActed => "already_acted".to_string(),
            RejectReason::NoWeapon => "no_weapon".to_string(),
            RejectReason::OutOfRange => "out_of_range".to_string(),
            RejectReason::InsufficientAmmo { kind } => {
                format!("insufficient_{}", kind.code())
            }
            RejectReason::NoTarget => "no_target".to_string(),
            RejectReason::NothingToRepair => "nothing_to_repair".to_string(),
            RejectReason::SessionNotActive => "session_not_active".to_string(),
            RejectReason::ExecutionFailed => "execution_failed".to_string(),
        }
    }
}

/// Outcome of command validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub reason: Option<RejectReason>,
}

impl ValidationOutcome {
    /// All preconditions hold.
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    /// A precondition failed.
    pub fn reject(reason: RejectReason) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }
}

/// Structural failures — malformed input or unknown references.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Dice notation did not match `NdM` (with optional flat modifier).
    #[error("invalid dice notation: {0:?}")]
    InvalidNotation(String),
    #[error("unknown session {0:?}")]
    SessionNotFound(SessionId),
    #[error("no weapon fitted at index {0}")]
    UnknownWeapon(usize),
    #[error("combatant {0:?} is not a participant in this session")]
    NotAParticipant(CombatantId),
    #[error("no command to undo")]
    NothingToUndo,
    #[error("no command to redo")]
    NothingToRedo,
}
