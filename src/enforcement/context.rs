//! Context provided to invariant checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Context key carrying the signal identifier.
pub const SIGNAL_ID: &str = "signal_id";
/// Context key set by the phase-two validation step.
pub const PHASE2_PASSED: &str = "phase2_passed";
/// Context key set by the allocation step.
pub const EXECUTION_ALLOWED: &str = "execution_allowed";
/// Context key holding the dispatch time of an order.
pub const DISPATCH_TIMESTAMP: &str = "dispatch_timestamp";
/// Context key forcing terminal finality.
pub const TERMINAL_REACHED: &str = "terminal_reached";

/// Read-only key/value context passed alongside a transition attempt.
///
/// Values are loosely typed JSON so the checker can reject values of the
/// wrong type instead of having them silently coerced. Keys the checker does
/// not recognize are carried but ignored.
///
/// # Example
///
/// ```rust
/// use signal_lifecycle::enforcement::TransitionContext;
///
/// let ctx = TransitionContext::new()
///     .signal_id("sig-42")
///     .phase2_passed(true)
///     .with("source", "scanner");
///
/// assert_eq!(ctx.get("signal_id").and_then(|v| v.as_str()), Some("sig-42"));
/// assert!(ctx.contains("source"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionContext {
    entries: BTreeMap<String, Value>,
}

impl TransitionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn signal_id(self, id: impl Into<String>) -> Self {
        self.with(SIGNAL_ID, id.into())
    }

    pub fn phase2_passed(self, passed: bool) -> Self {
        self.with(PHASE2_PASSED, passed)
    }

    pub fn execution_allowed(self, allowed: bool) -> Self {
        self.with(EXECUTION_ALLOWED, allowed)
    }

    /// Record the dispatch time. Any non-null value satisfies the gate.
    pub fn dispatch_timestamp(self, timestamp: impl Into<Value>) -> Self {
        self.with(DISPATCH_TIMESTAMP, timestamp)
    }

    pub fn terminal_reached(self, reached: bool) -> Self {
        self.with(TERMINAL_REACHED, reached)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// True only when `key` holds the boolean `true`.
    pub(crate) fn is_true(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Bool(true)))
    }

    /// True when `key` holds a value equal to `false`: the boolean itself
    /// or a numeric zero.
    pub(crate) fn equals_false(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(flag)) => !flag,
            Some(Value::Number(n)) => n.as_f64() == Some(0.0),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for TransitionContext {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
