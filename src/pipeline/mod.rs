//! Composition of the lifecycle stages for one transition.
//!
//! A [`TransitionPipeline`] runs the invariant checker, the state machine,
//! the audit logger and the observability hooks in that order. Any failure
//! leaves the machine, the audit trail and the metrics exactly as they were.
//!
//! The pipeline does not serialize callers. The orchestrator still owns one
//! `SignalStateMachine` per signal and must not drive the same signal from
//! two places at once; `&mut` access to the machine enforces that within a
//! thread, and a per-signal mutex does so across tasks.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use signal_lifecycle::audit::SignalAuditLogger;
//! use signal_lifecycle::core::SignalState;
//! use signal_lifecycle::enforcement::TransitionContext;
//! use signal_lifecycle::observability::{MetricsCollector, ObservabilityHooks, StructuredLogger};
//! use signal_lifecycle::pipeline::{TransitionPipelineBuilder, TransitionRequest};
//!
//! let pipeline = TransitionPipelineBuilder::new()
//!     .audit_logger(Arc::new(SignalAuditLogger::new()))
//!     .hooks(ObservabilityHooks::new(
//!         Arc::new(MetricsCollector::new()),
//!         Arc::new(StructuredLogger::new()),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let mut fsm = pipeline.start_signal("sig-7");
//! let event = pipeline
//!     .apply(
//!         &mut fsm,
//!         TransitionRequest::new("sig-7", SignalState::Validated, "phase two passed")
//!             .context(TransitionContext::new().phase2_passed(true)),
//!     )
//!     .unwrap();
//!
//! assert_eq!(fsm.state(), SignalState::Validated);
//! assert_eq!(event.actor(), "system");
//! ```

mod builder;
mod error;

pub use builder::{TransitionPipelineBuilder, DEFAULT_ACTOR};
pub use error::{BuildError, LifecycleError};

use crate::audit::{AuditEvent, SignalAuditLogger};
use crate::core::{Metadata, SignalState, TransitionRecord};
use crate::enforcement::context::SIGNAL_ID;
use crate::enforcement::{SignalStateInvariantChecker, TransitionContext};
use crate::machine::SignalStateMachine;
use crate::observability::ObservabilityHooks;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// One requested transition for one signal.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRequest {
    pub signal_id: String,
    pub to: SignalState,
    pub reason: String,
    pub actor: Option<String>,
    pub context: TransitionContext,
    pub metadata: Metadata,
    /// Time spent in the previous state, recorded as a latency sample.
    pub latency_seconds: Option<f64>,
}

impl TransitionRequest {
    pub fn new(signal_id: impl Into<String>, to: SignalState, reason: impl Into<String>) -> Self {
        Self {
            signal_id: signal_id.into(),
            to,
            reason: reason.into(),
            actor: None,
            context: TransitionContext::new(),
            metadata: Metadata::new(),
            latency_seconds: None,
        }
    }

    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn context(mut self, context: TransitionContext) -> Self {
        self.context = context;
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn latency_seconds(mut self, seconds: f64) -> Self {
        self.latency_seconds = Some(seconds);
        self
    }
}

/// Checker, machine, audit trail and hooks wired together.
pub struct TransitionPipeline {
    checker: SignalStateInvariantChecker,
    audit: Arc<SignalAuditLogger>,
    hooks: ObservabilityHooks,
    default_actor: String,
}

impl TransitionPipeline {
    pub fn audit_logger(&self) -> &Arc<SignalAuditLogger> {
        &self.audit
    }

    pub fn hooks(&self) -> &ObservabilityHooks {
        &self.hooks
    }

    pub fn default_actor(&self) -> &str {
        &self.default_actor
    }

    /// Create the machine for a new signal and report it as created.
    pub fn start_signal(&self, signal_id: &str) -> SignalStateMachine {
        self.hooks.on_signal_created(signal_id);
        SignalStateMachine::new()
    }

    /// Run one transition through every stage.
    ///
    /// The machine is only updated once the audit event has been stored,
    /// and hooks only run after that. A `signal_id` in the context must
    /// match the request's.
    pub fn apply(
        &self,
        machine: &mut SignalStateMachine,
        request: TransitionRequest,
    ) -> Result<AuditEvent, LifecycleError> {
        if let Some(Value::String(context_id)) = request.context.get(SIGNAL_ID) {
            if *context_id != request.signal_id {
                return Err(LifecycleError::SignalIdMismatch {
                    request: request.signal_id,
                    context: context_id.clone(),
                });
            }
        }

        let current = machine.state();
        self.checker
            .validate(current, request.to, Some(&request.context))?;

        let mut next = *machine;
        next.transition(request.to)?;

        let actor = request
            .actor
            .unwrap_or_else(|| self.default_actor.clone());
        let record = TransitionRecord::new(
            request.signal_id,
            current,
            request.to,
            actor,
            request.reason,
        )
        .metadata(request.metadata);
        let event = self.audit.append_event(record.clone())?;

        *machine = next;
        debug!(
            signal_id = event.signal_id(),
            from = %current,
            to = %request.to,
            "transition committed"
        );

        self.hooks
            .on_state_transition(&record.timestamp(event.timestamp()), request.latency_seconds);
        Ok(event)
    }
}
