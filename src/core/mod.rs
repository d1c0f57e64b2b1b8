//! Core lifecycle types.
//!
//! This module contains the pure data of the lifecycle:
//! - State definitions via the `State` trait and `SignalState`
//! - The static table of legal transitions
//! - `TransitionRecord`, the shape of a transition reported downstream
//!
//! Nothing in this module has behavior beyond lookups.

mod record;
mod state;
mod transitions;

pub use record::{Metadata, TransitionRecord};
pub use state::{ParseStateError, SignalState, State};
pub use transitions::{allowed_targets, is_allowed, ALLOWED_TRANSITIONS};
