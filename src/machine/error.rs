//! State machine error types.

use crate::core::SignalState;
use thiserror::Error;

/// Errors that can occur when driving a signal state machine
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StateTransitionError {
    #[error("Invalid transition: {from}->{to}")]
    InvalidTransition { from: SignalState, to: SignalState },
}
