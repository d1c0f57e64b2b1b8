//! Signal lifecycle: state control for trading signals
//!
//! Every signal moves through a fixed set of states, from `Pending` to one of
//! the terminal outcomes `Completed`, `Failed` or `Cancelled`. This crate keeps
//! those moves honest and leaves a tamper-evident trail of every one of them.
//!
//! # Core Concepts
//!
//! - **Transition table**: the only legal single-step moves between states
//! - **Invariant checker**: terminal finality, forward-only progression and
//!   context gates evaluated before a move is attempted
//! - **Audit logger**: append-only, hash-chained record of accepted moves
//! - **Observability hooks**: counters, per-state gauges, latency samples and
//!   structured logs, fed after a move has been audited
//! - **Pipeline**: the four stages above composed so that a move either lands
//!   everywhere or nowhere
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use signal_lifecycle::{
//!     MetricsCollector, ObservabilityHooks, SignalAuditLogger, SignalState,
//!     StructuredLogger, TransitionContext, TransitionPipelineBuilder, TransitionRequest,
//! };
//!
//! let audit = Arc::new(SignalAuditLogger::new());
//! let metrics = Arc::new(MetricsCollector::new());
//! let pipeline = TransitionPipelineBuilder::new()
//!     .audit_logger(Arc::clone(&audit))
//!     .hooks(ObservabilityHooks::new(
//!         Arc::clone(&metrics),
//!         Arc::new(StructuredLogger::new()),
//!     ))
//!     .default_actor("orchestrator")
//!     .build()
//!     .unwrap();
//!
//! let mut fsm = pipeline.start_signal("sig-1");
//! pipeline
//!     .apply(
//!         &mut fsm,
//!         TransitionRequest::new("sig-1", SignalState::Validated, "phase 2 ok")
//!             .context(TransitionContext::new().phase2_passed(true)),
//!     )
//!     .unwrap();
//!
//! assert_eq!(fsm.state(), SignalState::Validated);
//! assert!(audit.verify().unwrap());
//! assert_eq!(metrics.gauge(SignalState::Validated), 1);
//! ```

pub mod audit;
pub mod core;
pub mod enforcement;
pub mod machine;
pub mod observability;
pub mod pipeline;

// Re-export commonly used types
pub use audit::{verify_event_chain, AuditError, AuditEvent, SignalAuditLogger, GENESIS};
pub use core::{Metadata, SignalState, State, TransitionRecord};
pub use enforcement::{SignalStateInvariantChecker, StateInvariantError, TransitionContext};
pub use machine::{SignalStateMachine, StateTransitionError};
pub use observability::{MetricsCollector, MetricsSnapshot, ObservabilityHooks, StructuredLogger};
pub use pipeline::{
    BuildError, LifecycleError, TransitionPipeline, TransitionPipelineBuilder, TransitionRequest,
};
