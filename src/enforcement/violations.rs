//! Invariant violation errors.

use crate::core::SignalState;
use thiserror::Error;

/// Which side of a transition a state argument belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRole {
    Current,
    Next,
}

impl StateRole {
    fn field(self) -> &'static str {
        match self {
            Self::Current => "current_state",
            Self::Next => "next_state",
        }
    }
}

impl std::fmt::Display for StateRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field())
    }
}

/// Business invariants a transition attempt can violate.
///
/// Variants are listed in the order the checker evaluates them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateInvariantError {
    #[error("Invalid {role} type: {value:?}")]
    InvalidStateType { role: StateRole, value: String },

    #[error("Terminal state reached: no transition allowed from {current} to {next}")]
    TerminalState {
        current: SignalState,
        next: SignalState,
    },

    #[error("Backward transition not allowed: {current}->{next}")]
    BackwardTransition {
        current: SignalState,
        next: SignalState,
    },

    #[error("Backward transition not allowed: failed is only reachable from executing or active, not {current}")]
    FailureUnreachable { current: SignalState },

    #[error("Invalid signal_id type: expected string, got {found}")]
    InvalidSignalId { found: &'static str },

    #[error("Cannot transition to validated: phase2_passed=False")]
    Phase2NotPassed,

    #[error("Cannot transition to allocated: execution_allowed=False")]
    ExecutionNotAllowed,

    #[error("Cannot transition to executing: dispatch_timestamp=None")]
    MissingDispatchTimestamp,
}
