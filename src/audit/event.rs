//! Immutable audit records and their canonical hash.

use crate::audit::error::AuditError;
use crate::core::{Metadata, SignalState, TransitionRecord};
use chrono::{DateTime, SecondsFormat, SubsecRound, Timelike, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Chain anchor used as the previous hash of the first event.
pub const GENESIS: &str = "GENESIS";

/// One accepted transition, sealed by its chained hash.
///
/// Fields are private; an event can only be produced by the audit logger
/// (or deserialized for verification) and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    signal_id: String,
    prev_state: SignalState,
    next_state: SignalState,
    timestamp: DateTime<Utc>,
    actor: String,
    reason: String,
    #[serde(default)]
    metadata: Metadata,
    event_hash: String,
}

/// Fields covered by the hash, serialized as RFC 8785 canonical JSON.
#[derive(Serialize)]
struct HashPayload<'a> {
    signal_id: &'a str,
    prev_state: &'static str,
    next_state: &'static str,
    timestamp: String,
    actor: &'a str,
    reason: &'a str,
    metadata: &'a Metadata,
}

impl AuditEvent {
    /// Build and seal an event chained onto `previous_hash`.
    ///
    /// Empty `signal_id`, `actor` or `reason` is rejected before hashing.
    /// The timestamp is truncated to microseconds, the precision the hash
    /// covers.
    pub(crate) fn seal(
        record: TransitionRecord,
        previous_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, AuditError> {
        require_non_empty("signal_id", &record.signal_id)?;
        require_non_empty("actor", &record.actor)?;
        require_non_empty("reason", &record.reason)?;

        let timestamp = record.timestamp.unwrap_or(now).trunc_subsecs(6);
        let event_hash = compute_event_hash(previous_hash, &record, &timestamp)?;
        Ok(Self {
            signal_id: record.signal_id,
            prev_state: record.prev_state,
            next_state: record.next_state,
            timestamp,
            actor: record.actor,
            reason: record.reason,
            metadata: record.metadata,
            event_hash,
        })
    }

    pub fn signal_id(&self) -> &str {
        &self.signal_id
    }

    pub fn prev_state(&self) -> SignalState {
        self.prev_state
    }

    pub fn next_state(&self) -> SignalState {
        self.next_state
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn event_hash(&self) -> &str {
        &self.event_hash
    }

    /// Hash this event's payload as if chained onto `previous_hash`.
    ///
    /// `SHA256(previous_hash ++ canonical_json(payload))`, hex encoded.
    pub fn recompute_hash(&self, previous_hash: &str) -> Result<String, AuditError> {
        hash_payload(
            previous_hash,
            &HashPayload {
                signal_id: &self.signal_id,
                prev_state: self.prev_state.as_str(),
                next_state: self.next_state.as_str(),
                timestamp: canonical_timestamp(&self.timestamp),
                actor: &self.actor,
                reason: &self.reason,
                metadata: &self.metadata,
            },
        )
    }

    /// Structural checks applied before chain verification.
    pub(crate) fn check_well_formed(&self) -> Result<(), String> {
        for (field, value) in [
            ("signal_id", &self.signal_id),
            ("actor", &self.actor),
            ("reason", &self.reason),
        ] {
            if value.is_empty() {
                return Err(format!("{field} must be a non-empty string"));
            }
        }
        let is_digest = self.event_hash.len() == 64
            && self
                .event_hash
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !is_digest {
            return Err(format!(
                "event_hash is not a SHA-256 hex digest: {:?}",
                self.event_hash
            ));
        }
        if self.timestamp.nanosecond() % 1_000 != 0 {
            return Err(format!(
                "timestamp has sub-microsecond precision: {}",
                self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
            ));
        }
        Ok(())
    }
}

/// Hash `record` stamped at `timestamp` as if chained onto `previous_hash`.
///
/// `record.timestamp` is not consulted. This is the digest the audit logger
/// stores, so other implementations can be checked against it directly.
pub fn compute_event_hash(
    previous_hash: &str,
    record: &TransitionRecord,
    timestamp: &DateTime<Utc>,
) -> Result<String, AuditError> {
    hash_payload(
        previous_hash,
        &HashPayload {
            signal_id: &record.signal_id,
            prev_state: record.prev_state.as_str(),
            next_state: record.next_state.as_str(),
            timestamp: canonical_timestamp(timestamp),
            actor: &record.actor,
            reason: &record.reason,
            metadata: &record.metadata,
        },
    )
}

fn hash_payload(previous_hash: &str, payload: &HashPayload<'_>) -> Result<String, AuditError> {
    let canonical = serde_jcs::to_string(payload)?;

    let mut hasher = Sha256::new();
    hasher.update(previous_hash.as_bytes());
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// ISO-8601 with an explicit `+00:00` offset.
///
/// The fraction is written as six digits, and left out entirely when the
/// microsecond part is zero: `2024-01-01T12:00:00+00:00`,
/// `2024-01-01T12:00:00.250000+00:00`. Sub-microsecond digits are dropped.
pub fn canonical_timestamp(timestamp: &DateTime<Utc>) -> String {
    let format = if timestamp.nanosecond() / 1_000 == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    timestamp.to_rfc3339_opts(format, false)
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), AuditError> {
    if value.is_empty() {
        return Err(AuditError::EmptyField { field });
    }
    Ok(())
}
