//! Pipeline error types.

use crate::audit::AuditError;
use crate::enforcement::StateInvariantError;
use crate::machine::StateTransitionError;
use thiserror::Error;

/// Errors that can occur when building a transition pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Audit logger not specified. Call .audit_logger(logger) before .build()")]
    MissingAuditLogger,

    #[error("Observability hooks not specified. Call .hooks(hooks) before .build()")]
    MissingHooks,

    #[error("Default actor must be a non-empty string")]
    EmptyDefaultActor,
}

/// Why a pipeline transition was rejected.
///
/// Whichever stage fails, nothing downstream of it has run.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Context signal_id '{context}' does not match request signal_id '{request}'")]
    SignalIdMismatch { request: String, context: String },

    #[error(transparent)]
    Invariant(#[from] StateInvariantError),

    #[error(transparent)]
    Transition(#[from] StateTransitionError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}
