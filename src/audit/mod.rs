//! Tamper-evident audit trail for accepted transitions.
//!
//! Every event's hash covers the previous event's hash, starting from the
//! literal `"GENESIS"`:
//!
//! ```text
//! event_hash = hex(SHA256(previous_hash ++ canonical_json(payload)))
//! ```
//!
//! `payload` holds `signal_id`, `prev_state`, `next_state`, `timestamp`,
//! `actor`, `reason` and `metadata`. It is serialized with RFC 8785 (sorted
//! keys, no whitespace), states as their string values and timestamps as
//! `YYYY-MM-DDTHH:MM:SS[.ffffff]+00:00` (fraction omitted when zero), so
//! chains verify identically across implementations.
//!
//! The trail lives in process memory only; persisting it is up to the host.

mod chain;
mod error;
mod event;
mod logger;

pub use chain::{first_broken_link, verify_event_chain};
pub use error::AuditError;
pub use event::{canonical_timestamp, compute_event_hash, AuditEvent, GENESIS};
pub use logger::SignalAuditLogger;
