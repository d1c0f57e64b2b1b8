//! Lifecycle states for trading signals.
//!
//! The `State` trait provides pure methods for inspecting state properties
//! without side effects. `SignalState` is the concrete lifecycle every signal
//! moves through.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use thiserror::Error;

/// Trait for lifecycle states.
///
/// All methods are pure - no side effects. States represent immutable
/// values that describe the current position in a lifecycle.
///
/// # Example
///
/// ```rust
/// use signal_lifecycle::core::{SignalState, State};
///
/// assert_eq!(SignalState::Executing.name(), "executing");
/// assert!(SignalState::Failed.is_final());
/// assert!(SignalState::Failed.is_error());
/// assert!(!SignalState::Completed.is_error());
/// ```
pub trait State:
    Copy + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &'static str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Position of a trading signal in its lifecycle.
///
/// The string values returned by [`SignalState::as_str`] are embedded in
/// every audit hash. Renaming one breaks verification of chains recorded
/// before the rename.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SignalState {
    #[default]
    Pending,
    Validated,
    Allocated,
    Executing,
    Active,
    Completed,
    Failed,
    Cancelled,
}

impl SignalState {
    /// Every state, in ordinal order.
    pub const ALL: [SignalState; 8] = [
        SignalState::Pending,
        SignalState::Validated,
        SignalState::Allocated,
        SignalState::Executing,
        SignalState::Active,
        SignalState::Completed,
        SignalState::Failed,
        SignalState::Cancelled,
    ];

    /// Stable string value used in hashes, gauges and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Validated => "validated",
            Self::Allocated => "allocated",
            Self::Executing => "executing",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Index into tables keyed by state.
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Terminal states admit no outgoing transition.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Rank on the forward progression path.
    ///
    /// `Failed` and `Cancelled` are exits rather than steps and have no rank.
    pub const fn progression_rank(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Validated => Some(1),
            Self::Allocated => Some(2),
            Self::Executing => Some(3),
            Self::Active => Some(4),
            Self::Completed => Some(5),
            Self::Failed | Self::Cancelled => None,
        }
    }
}

impl State for SignalState {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn is_final(&self) -> bool {
        self.is_terminal()
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state name that does not belong to [`SignalState`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown signal state '{0}'")]
pub struct ParseStateError(pub String);

impl FromStr for SignalState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseStateError(s.to_string()))
    }
}
