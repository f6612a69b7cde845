//! Engine error taxonomy.
//!
//! Recoverable player mistakes (`IllegalAction`, `InvalidTradeOffer`) never
//! mutate state; `InvariantViolation` signals an engine bug surfaced by the
//! consistency audit. Insufficient funds is not an error at all: the engine
//! converts it into the debt-settlement / bankruptcy flow.

use crate::catalog::ActionKind;
use crate::engine::Phase;

/// Errors surfaced by the engine and environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The submitted action is not in the current legal set.
    #[error("illegal action {kind:?} in phase {phase:?}: {reason}")]
    IllegalAction {
        kind: ActionKind,
        phase: Phase,
        reason: String,
    },

    /// A trade offer referenced assets its parties do not hold.
    #[error("invalid trade offer: {0}")]
    InvalidTradeOffer(String),

    /// Internal consistency check failed. Indicates an engine bug.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// An action arrived after the game reached its terminal phase.
    #[error("game is over; no further actions accepted")]
    GameOver,
}

impl EngineError {
    /// Shorthand for an [`EngineError::IllegalAction`].
    pub fn illegal(kind: ActionKind, phase: Phase, reason: impl Into<String>) -> Self {
        Self::IllegalAction {
            kind,
            phase,
            reason: reason.into(),
        }
    }
}
