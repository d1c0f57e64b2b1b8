//! Invariant checker for signal transitions.

use crate::core::{SignalState, State};
use crate::enforcement::context::{
    TransitionContext, DISPATCH_TIMESTAMP, EXECUTION_ALLOWED, PHASE2_PASSED, SIGNAL_ID,
    TERMINAL_REACHED,
};
use crate::enforcement::violations::{StateInvariantError, StateRole};
use serde_json::Value;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = fn(SignalState, SignalState, &TransitionContext) -> Result<(), StateInvariantError>;

/// Checks after state type validity, in evaluation order.
const CHECKS: [Check; 4] = [
    check_terminal_finality,
    check_progression,
    check_signal_id,
    check_target_preconditions,
];

/// Stateless validator for rules the transition table cannot express.
///
/// The checker is pure: it never mutates the context and identical inputs
/// always produce the identical outcome.
///
/// # Example
///
/// ```rust
/// use signal_lifecycle::core::SignalState;
/// use signal_lifecycle::enforcement::{SignalStateInvariantChecker, TransitionContext};
///
/// let checker = SignalStateInvariantChecker::new();
/// let ctx = TransitionContext::new().phase2_passed(false);
///
/// let err = checker
///     .validate(SignalState::Pending, SignalState::Validated, Some(&ctx))
///     .unwrap_err();
/// assert!(err.to_string().contains("phase2_passed=False"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SignalStateInvariantChecker;

impl SignalStateInvariantChecker {
    pub fn new() -> Self {
        Self
    }

    /// Validate a transition attempt, failing on the first broken invariant.
    ///
    /// Checks run in a fixed order: terminal finality, monotonic progression,
    /// `signal_id` type, then the precondition gating `next`.
    pub fn validate(
        &self,
        current: SignalState,
        next: SignalState,
        context: Option<&TransitionContext>,
    ) -> Result<(), StateInvariantError> {
        let empty = TransitionContext::default();
        let context = context.unwrap_or(&empty);
        CHECKS
            .iter()
            .try_for_each(|check| check(current, next, context))
    }

    /// Validate a transition given state names from an untyped source.
    ///
    /// Names that do not parse fail before any other check runs.
    pub fn validate_named(
        &self,
        current: &str,
        next: &str,
        context: Option<&TransitionContext>,
    ) -> Result<(), StateInvariantError> {
        let current = parse_state(current, StateRole::Current)?;
        let next = parse_state(next, StateRole::Next)?;
        self.validate(current, next, context)
    }

    /// Run every check and accumulate ALL violations.
    ///
    /// Intended for diagnostics; transition decisions should use
    /// [`validate`](Self::validate).
    pub fn violations(
        &self,
        current: SignalState,
        next: SignalState,
        context: Option<&TransitionContext>,
    ) -> Validation<(), NonEmptyVec<StateInvariantError>> {
        let empty = TransitionContext::default();
        let context = context.unwrap_or(&empty);
        let checks: Vec<Validation<(), NonEmptyVec<StateInvariantError>>> = CHECKS
            .iter()
            .map(|check| match check(current, next, context) {
                Ok(()) => Validation::success(()),
                Err(violation) => Validation::fail(violation),
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }
}

fn parse_state(name: &str, role: StateRole) -> Result<SignalState, StateInvariantError> {
    name.parse()
        .map_err(|_| StateInvariantError::InvalidStateType {
            role,
            value: name.to_string(),
        })
}

fn check_terminal_finality(
    current: SignalState,
    next: SignalState,
    context: &TransitionContext,
) -> Result<(), StateInvariantError> {
    if current.is_final() || context.is_true(TERMINAL_REACHED) {
        return Err(StateInvariantError::TerminalState { current, next });
    }
    Ok(())
}

// Cancelled and Failed are matched by name, not derived from the rank order.
fn check_progression(
    current: SignalState,
    next: SignalState,
    _context: &TransitionContext,
) -> Result<(), StateInvariantError> {
    match next {
        SignalState::Cancelled => Ok(()),
        SignalState::Failed => match current {
            SignalState::Executing | SignalState::Active => Ok(()),
            _ => Err(StateInvariantError::FailureUnreachable { current }),
        },
        _ => match (current.progression_rank(), next.progression_rank()) {
            (Some(from), Some(to)) if to > from => Ok(()),
            _ => Err(StateInvariantError::BackwardTransition { current, next }),
        },
    }
}

fn check_signal_id(
    _current: SignalState,
    _next: SignalState,
    context: &TransitionContext,
) -> Result<(), StateInvariantError> {
    match context.get(SIGNAL_ID) {
        None | Some(Value::String(_)) => Ok(()),
        Some(other) => Err(StateInvariantError::InvalidSignalId {
            found: json_type_name(other),
        }),
    }
}

fn check_target_preconditions(
    _current: SignalState,
    next: SignalState,
    context: &TransitionContext,
) -> Result<(), StateInvariantError> {
    match next {
        SignalState::Validated if context.equals_false(PHASE2_PASSED) => {
            Err(StateInvariantError::Phase2NotPassed)
        }
        SignalState::Allocated if context.equals_false(EXECUTION_ALLOWED) => {
            Err(StateInvariantError::ExecutionNotAllowed)
        }
        SignalState::Executing if matches!(context.get(DISPATCH_TIMESTAMP), Some(Value::Null)) => {
            Err(StateInvariantError::MissingDispatchTimestamp)
        }
        _ => Ok(()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
