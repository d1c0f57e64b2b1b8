//! Static table of legal lifecycle transitions.
//!
//! The table is plain data indexed by [`SignalState::ordinal`], so it can be
//! inspected and tested without a state machine.

use super::state::SignalState;

/// Legal targets for each state, indexed by ordinal.
pub static ALLOWED_TRANSITIONS: [&[SignalState]; 8] = [
    // pending
    &[SignalState::Validated, SignalState::Cancelled],
    // validated
    &[SignalState::Allocated, SignalState::Cancelled],
    // allocated
    &[SignalState::Executing, SignalState::Cancelled],
    // executing
    &[SignalState::Active, SignalState::Failed],
    // active
    &[SignalState::Completed, SignalState::Failed],
    // completed
    &[],
    // failed
    &[],
    // cancelled
    &[],
];

/// Legal targets reachable in one step from `from`.
pub fn allowed_targets(from: SignalState) -> &'static [SignalState] {
    ALLOWED_TRANSITIONS[from.ordinal()]
}

/// Check whether `from -> to` is in the table.
pub fn is_allowed(from: SignalState, to: SignalState) -> bool {
    allowed_targets(from).contains(&to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    #[test]
    fn terminal_states_have_no_targets() {
        for state in SignalState::ALL {
            if state.is_final() {
                assert!(allowed_targets(state).is_empty(), "{state} has targets");
            } else {
                assert!(!allowed_targets(state).is_empty(), "{state} is a dead end");
            }
        }
    }

    #[test]
    fn happy_path_is_allowed() {
        let path = [
            SignalState::Pending,
            SignalState::Validated,
            SignalState::Allocated,
            SignalState::Executing,
            SignalState::Active,
            SignalState::Completed,
        ];
        for pair in path.windows(2) {
            assert!(is_allowed(pair[0], pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn cancellation_only_before_execution() {
        let cancellable: Vec<_> = SignalState::ALL
            .into_iter()
            .filter(|s| is_allowed(*s, SignalState::Cancelled))
            .collect();
        assert_eq!(
            cancellable,
            vec![
                SignalState::Pending,
                SignalState::Validated,
                SignalState::Allocated
            ]
        );
    }

    #[test]
    fn failure_only_after_dispatch() {
        let failable: Vec<_> = SignalState::ALL
            .into_iter()
            .filter(|s| is_allowed(*s, SignalState::Failed))
            .collect();
        assert_eq!(failable, vec![SignalState::Executing, SignalState::Active]);
    }

    #[test]
    fn no_self_loops_or_backward_edges() {
        for from in SignalState::ALL {
            for &to in allowed_targets(from) {
                assert_ne!(from, to);
                if let (Some(a), Some(b)) = (from.progression_rank(), to.progression_rank()) {
                    assert!(b > a, "{from} -> {to} goes backward");
                }
            }
        }
    }
}
