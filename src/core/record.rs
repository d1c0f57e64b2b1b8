//! Description of one transition handed to the audit and telemetry layers.

use super::state::SignalState;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Opaque metadata carried with a transition.
pub type Metadata = Map<String, Value>;

/// A transition as reported by the orchestrator.
///
/// The same record feeds [`SignalAuditLogger::append_event`] and
/// [`ObservabilityHooks::on_state_transition`], so both layers see identical
/// fields.
///
/// [`SignalAuditLogger::append_event`]: crate::audit::SignalAuditLogger::append_event
/// [`ObservabilityHooks::on_state_transition`]: crate::observability::ObservabilityHooks::on_state_transition
///
/// # Example
///
/// ```rust
/// use signal_lifecycle::core::{Metadata, SignalState, TransitionRecord};
///
/// let mut metadata = Metadata::new();
/// metadata.insert("confidence".into(), serde_json::json!(87));
///
/// let record = TransitionRecord::new(
///     "sig-1",
///     SignalState::Pending,
///     SignalState::Validated,
///     "validator",
///     "phase two passed",
/// )
/// .metadata(metadata);
///
/// assert!(record.timestamp.is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRecord {
    pub signal_id: String,
    pub prev_state: SignalState,
    pub next_state: SignalState,
    pub actor: String,
    pub reason: String,
    pub metadata: Metadata,
    /// When `None`, the consumer stamps the record with the current time.
    pub timestamp: Option<DateTime<Utc>>,
}

impl TransitionRecord {
    pub fn new(
        signal_id: impl Into<String>,
        prev_state: SignalState,
        next_state: SignalState,
        actor: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            signal_id: signal_id.into(),
            prev_state,
            next_state,
            actor: actor.into(),
            reason: reason.into(),
            metadata: Metadata::new(),
            timestamp: None,
        }
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
