//! Audit trail error types.

use thiserror::Error;

/// Errors that can occur when recording or verifying audit events
#[derive(Debug, Error)]
pub enum AuditError {
    /// A required text field was empty; nothing was hashed or stored
    #[error("{field} must be a non-empty string")]
    EmptyField { field: &'static str },

    /// An event handed to chain verification is structurally invalid
    #[error("Malformed audit event at index {index}: {reason}")]
    MalformedEvent { index: usize, reason: String },

    /// The canonical hash payload could not be serialized
    #[error("Canonical serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
