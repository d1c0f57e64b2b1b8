//! Invariant enforcement for signal transitions.
//!
//! The transition table says which moves exist; this module says which of
//! them are permitted right now. `SignalStateInvariantChecker::validate`
//! fails fast on the first broken rule, while `violations` uses Stillwater's
//! `Validation` to collect every broken rule for diagnostics.
//!
//! # Example
//!
//! ```rust
//! use signal_lifecycle::core::SignalState;
//! use signal_lifecycle::enforcement::{SignalStateInvariantChecker, TransitionContext};
//!
//! let checker = SignalStateInvariantChecker::new();
//! let ctx = TransitionContext::new()
//!     .signal_id("sig-1")
//!     .dispatch_timestamp("2024-05-01T09:30:00Z");
//!
//! assert!(checker
//!     .validate(SignalState::Allocated, SignalState::Executing, Some(&ctx))
//!     .is_ok());
//! ```

pub mod checker;
pub mod context;
pub mod violations;

// Re-export commonly used types
pub use checker::SignalStateInvariantChecker;
pub use context::TransitionContext;
pub use violations::{StateInvariantError, StateRole};
