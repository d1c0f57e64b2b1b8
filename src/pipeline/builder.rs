//! Builder for transition pipelines.

use crate::audit::SignalAuditLogger;
use crate::enforcement::SignalStateInvariantChecker;
use crate::observability::ObservabilityHooks;
use crate::pipeline::error::BuildError;
use crate::pipeline::TransitionPipeline;
use std::sync::Arc;

/// Actor recorded when a request does not name one.
pub const DEFAULT_ACTOR: &str = "system";

/// Builder for constructing a [`TransitionPipeline`] with a fluent API.
pub struct TransitionPipelineBuilder {
    checker: SignalStateInvariantChecker,
    audit: Option<Arc<SignalAuditLogger>>,
    hooks: Option<ObservabilityHooks>,
    default_actor: String,
}

impl TransitionPipelineBuilder {
    pub fn new() -> Self {
        Self {
            checker: SignalStateInvariantChecker::new(),
            audit: None,
            hooks: None,
            default_actor: DEFAULT_ACTOR.to_string(),
        }
    }

    pub fn checker(mut self, checker: SignalStateInvariantChecker) -> Self {
        self.checker = checker;
        self
    }

    /// Set the shared audit logger (required).
    pub fn audit_logger(mut self, logger: Arc<SignalAuditLogger>) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Set the observability hooks (required).
    pub fn hooks(mut self, hooks: ObservabilityHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn default_actor(mut self, actor: impl Into<String>) -> Self {
        self.default_actor = actor.into();
        self
    }

    /// Build the pipeline.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<TransitionPipeline, BuildError> {
        let audit = self.audit.ok_or(BuildError::MissingAuditLogger)?;
        let hooks = self.hooks.ok_or(BuildError::MissingHooks)?;
        if self.default_actor.is_empty() {
            return Err(BuildError::EmptyDefaultActor);
        }

        Ok(TransitionPipeline {
            checker: self.checker,
            audit,
            hooks,
            default_actor: self.default_actor,
        })
    }
}

impl Default for TransitionPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
