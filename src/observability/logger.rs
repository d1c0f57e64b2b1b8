//! Append-only structured transition log.

use crate::audit::canonical_timestamp;
use crate::core::{Metadata, SignalState, TransitionRecord};
use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

/// Phase tag written on every transition entry.
pub const TRANSITION_PHASE: &str = "state_transition";

/// One structured log line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogEntry {
    pub phase: &'static str,
    pub timestamp: String,
    pub signal_id: String,
    pub from_state: SignalState,
    pub to_state: SignalState,
    pub actor: String,
    pub reason: String,
    pub metadata: Metadata,
}

/// In-memory structured log of lifecycle transitions.
///
/// Each entry is also emitted as a `tracing` event so a host subscriber sees
/// the same fields.
#[derive(Debug, Default)]
pub struct StructuredLogger {
    entries: RwLock<Vec<LogEntry>>,
}

impl StructuredLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_transition(&self, record: &TransitionRecord) {
        let timestamp = record.timestamp.unwrap_or_else(Utc::now);
        let entry = LogEntry {
            phase: TRANSITION_PHASE,
            timestamp: canonical_timestamp(&timestamp),
            signal_id: record.signal_id.clone(),
            from_state: record.prev_state,
            to_state: record.next_state,
            actor: record.actor.clone(),
            reason: record.reason.clone(),
            metadata: record.metadata.clone(),
        };

        info!(
            phase = entry.phase,
            signal_id = %entry.signal_id,
            from = %entry.from_state,
            to = %entry.to_state,
            actor = %entry.actor,
            reason = %entry.reason,
            "signal state transition"
        );

        self.entries.write().push(entry);
    }

    /// Entries in append order, optionally filtered by signal.
    pub fn get_logs(&self, signal_id: Option<&str>) -> Vec<LogEntry> {
        let entries = self.entries.read();
        match signal_id {
            Some(id) => entries
                .iter()
                .filter(|e| e.signal_id == id)
                .cloned()
                .collect(),
            None => entries.clone(),
        }
    }

    /// Drop every entry. Only meant for test isolation.
    pub fn clear_logs(&self) {
        self.entries.write().clear();
    }
}
