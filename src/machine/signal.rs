//! Per-signal state machine.

use crate::core::{allowed_targets, is_allowed, SignalState, State};
use crate::machine::error::StateTransitionError;
use serde::{Deserialize, Serialize};

/// State machine owning the lifecycle position of one signal.
///
/// The only way to change the state is [`SignalStateMachine::transition`],
/// which consults the static transition table and nothing else. Business
/// preconditions live in the invariant checker.
///
/// # Example
///
/// ```rust
/// use signal_lifecycle::core::SignalState;
/// use signal_lifecycle::machine::SignalStateMachine;
///
/// let mut fsm = SignalStateMachine::new();
/// fsm.transition(SignalState::Validated).unwrap();
///
/// assert!(fsm.transition(SignalState::Pending).is_err());
/// assert_eq!(fsm.state(), SignalState::Validated);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalStateMachine {
    state: SignalState,
}

impl SignalStateMachine {
    /// Create a state machine in `Pending`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state machine in an arbitrary initial state
    pub fn with_state(initial: SignalState) -> Self {
        Self { state: initial }
    }

    /// Get current state (pure)
    pub fn state(&self) -> SignalState {
        self.state
    }

    /// Check if machine is in a terminal state (pure)
    pub fn is_terminal(&self) -> bool {
        self.state.is_final()
    }

    /// Targets legal from the current state (pure)
    pub fn allowed_targets(&self) -> &'static [SignalState] {
        allowed_targets(self.state)
    }

    /// Check whether `to` is reachable in one step (pure)
    pub fn can_transition(&self, to: SignalState) -> bool {
        is_allowed(self.state, to)
    }

    /// Move to `to` if the transition table allows it.
    ///
    /// On error the state is left exactly as it was.
    pub fn transition(&mut self, to: SignalState) -> Result<(), StateTransitionError> {
        if !self.can_transition(to) {
            return Err(StateTransitionError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_machine_starts_pending() {
        let machine = SignalStateMachine::new();
        assert_eq!(machine.state(), SignalState::Pending);
        assert!(!machine.is_terminal());
    }

    #[test]
    fn with_state_keeps_initial_state() {
        for state in SignalState::ALL {
            assert_eq!(SignalStateMachine::with_state(state).state(), state);
        }
    }

    #[test]
    fn simple_transition_succeeds() {
        let mut machine = SignalStateMachine::new();
        machine.transition(SignalState::Validated).unwrap();
        assert_eq!(machine.state(), SignalState::Validated);
    }

    #[test]
    fn backward_transition_is_rejected_without_mutation() {
        let mut machine = SignalStateMachine::new();
        machine.transition(SignalState::Validated).unwrap();

        let err = machine.transition(SignalState::Pending).unwrap_err();

        assert_eq!(
            err,
            StateTransitionError::InvalidTransition {
                from: SignalState::Validated,
                to: SignalState::Pending,
            }
        );
        assert_eq!(err.to_string(), "Invalid transition: validated->pending");
        assert_eq!(machine.state(), SignalState::Validated);
    }

    #[test]
    fn terminal_states_reject_everything() {
        for terminal in [
            SignalState::Completed,
            SignalState::Failed,
            SignalState::Cancelled,
        ] {
            for to in SignalState::ALL {
                let mut machine = SignalStateMachine::with_state(terminal);
                assert!(machine.transition(to).is_err());
                assert_eq!(machine.state(), terminal);
            }
        }
    }

    #[test]
    fn self_transition_is_rejected() {
        let mut machine = SignalStateMachine::with_state(SignalState::Active);
        assert!(machine.transition(SignalState::Active).is_err());
        assert_eq!(machine.state(), SignalState::Active);
    }

    #[test]
    fn multi_step_workflow() {
        let mut machine = SignalStateMachine::new();
        for step in [
            SignalState::Validated,
            SignalState::Allocated,
            SignalState::Executing,
            SignalState::Active,
            SignalState::Completed,
        ] {
            machine.transition(step).unwrap();
            assert_eq!(machine.state(), step);
        }
        assert!(machine.is_terminal());
        assert!(machine.allowed_targets().is_empty());
    }

    #[test]
    fn execution_cannot_be_cancelled() {
        let mut machine = SignalStateMachine::with_state(SignalState::Executing);
        assert!(!machine.can_transition(SignalState::Cancelled));
        assert!(machine.transition(SignalState::Cancelled).is_err());
        machine.transition(SignalState::Failed).unwrap();
        assert_eq!(machine.state(), SignalState::Failed);
    }
}
