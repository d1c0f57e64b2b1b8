//! Hash chain verification.

use crate::audit::error::AuditError;
use crate::audit::event::{AuditEvent, GENESIS};
use tracing::warn;

/// Recompute every hash from [`GENESIS`] and report whether the chain holds.
///
/// Returns `Ok(true)` for an empty slice. An event whose content was altered
/// fails on its own hash; an event moved or spliced in fails on its own hash
/// or on the hash of the event that follows it.
///
/// # Errors
///
/// Returns [`AuditError::MalformedEvent`] for events with empty identity
/// fields or a hash that is not a hex SHA-256 digest.
///
/// # Example
///
/// ```rust
/// use signal_lifecycle::audit::{verify_event_chain, SignalAuditLogger};
/// use signal_lifecycle::core::{SignalState, TransitionRecord};
///
/// let logger = SignalAuditLogger::new();
/// let e1 = logger.append_event(TransitionRecord::new("s1", SignalState::Pending, SignalState::Validated, "sys", "ok")).unwrap();
/// let e2 = logger.append_event(TransitionRecord::new("s1", SignalState::Validated, SignalState::Allocated, "sys", "ok")).unwrap();
///
/// assert!(verify_event_chain(&[e1.clone(), e2.clone()]).unwrap());
/// assert!(!verify_event_chain(&[e2, e1]).unwrap());
/// ```
pub fn verify_event_chain(events: &[AuditEvent]) -> Result<bool, AuditError> {
    Ok(first_broken_link(events)?.is_none())
}

/// Index of the first event whose stored hash does not match its recomputed
/// hash, or `None` when the whole chain is intact.
pub fn first_broken_link(events: &[AuditEvent]) -> Result<Option<usize>, AuditError> {
    for (index, event) in events.iter().enumerate() {
        event
            .check_well_formed()
            .map_err(|reason| AuditError::MalformedEvent { index, reason })?;
    }

    let mut previous_hash = GENESIS;
    for (index, event) in events.iter().enumerate() {
        let expected = event.recompute_hash(previous_hash)?;
        if expected != event.event_hash() {
            warn!(
                index,
                signal_id = event.signal_id(),
                stored = event.event_hash(),
                expected = %expected,
                "audit chain mismatch"
            );
            return Ok(Some(index));
        }
        previous_hash = event.event_hash();
    }
    Ok(None)
}
