//! Passive telemetry for signal lifecycles.
//!
//! Nothing in this module influences a transition: hooks return `()`, never
//! fail, and are called only after a transition has been accepted and
//! audited. Collectors are plain values shared by `Arc`; exporting them is
//! left to the host.

mod hooks;
mod logger;
mod metrics;

pub use hooks::ObservabilityHooks;
pub use logger::{LogEntry, StructuredLogger, TRANSITION_PHASE};
pub use metrics::{
    gauge_name, Counter, Histogram, HistogramSummary, MetricsCollector, MetricsSnapshot,
};
