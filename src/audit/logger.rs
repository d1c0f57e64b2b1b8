//! Append-only, hash-chained audit logger.

use crate::audit::chain::verify_event_chain;
use crate::audit::error::AuditError;
use crate::audit::event::{AuditEvent, GENESIS};
use crate::core::TransitionRecord;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug)]
struct Chain {
    events: Vec<AuditEvent>,
    last_hash: String,
}

/// Ordered audit trail of accepted transitions.
///
/// Appends are serialized by a write lock so the chain pointer and the
/// event order always agree; reads take the shared lock and return copies.
/// The logger records what it is told and does not re-check transition
/// legality.
#[derive(Debug)]
pub struct SignalAuditLogger {
    chain: RwLock<Chain>,
}

impl Default for SignalAuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalAuditLogger {
    pub fn new() -> Self {
        Self {
            chain: RwLock::new(Chain {
                events: Vec::new(),
                last_hash: GENESIS.to_string(),
            }),
        }
    }

    /// Seal `record` onto the end of the chain and return a copy of the event.
    ///
    /// Invalid input is rejected before anything is stored.
    pub fn append_event(&self, record: TransitionRecord) -> Result<AuditEvent, AuditError> {
        let mut chain = self.chain.write();
        let event = AuditEvent::seal(record, &chain.last_hash, Utc::now())?;

        debug!(
            signal_id = event.signal_id(),
            from = %event.prev_state(),
            to = %event.next_state(),
            hash = event.event_hash(),
            "audit event appended"
        );

        chain.last_hash = event.event_hash().to_string();
        chain.events.push(event.clone());
        Ok(event)
    }

    /// Copy of the events in append order, optionally filtered by signal.
    pub fn get_events(&self, signal_id: Option<&str>) -> Vec<AuditEvent> {
        let chain = self.chain.read();
        match signal_id {
            Some(id) => chain
                .events
                .iter()
                .filter(|e| e.signal_id() == id)
                .cloned()
                .collect(),
            None => chain.events.clone(),
        }
    }

    /// Hash the next event will chain onto.
    pub fn last_hash(&self) -> String {
        self.chain.read().last_hash.clone()
    }

    pub fn len(&self) -> usize {
        self.chain.read().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.read().events.is_empty()
    }

    /// Verify the logger's own chain.
    pub fn verify(&self) -> Result<bool, AuditError> {
        verify_event_chain(&self.chain.read().events)
    }
}
