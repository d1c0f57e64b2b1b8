//! Finite state machine for a single signal.
//!
//! The machine holds exactly one current state and changes it only through
//! `transition()`. It performs no I/O and emits no logs; recording and
//! telemetry are the audit and observability layers' job.

mod error;
mod signal;

pub use error::StateTransitionError;
pub use signal::SignalStateMachine;
