//! Single integration point between the orchestrator and telemetry.

use crate::core::{SignalState, TransitionRecord};
use crate::observability::logger::StructuredLogger;
use crate::observability::metrics::{Counter, Histogram, MetricsCollector};
use std::sync::Arc;
use tracing::{debug, info};

/// Lifecycle hooks feeding the metrics collector and structured logger.
///
/// Hooks are fire-and-forget: they return nothing and never fail, so the
/// orchestrator cannot branch on telemetry.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use signal_lifecycle::observability::{MetricsCollector, ObservabilityHooks, StructuredLogger};
///
/// let hooks = ObservabilityHooks::new(
///     Arc::new(MetricsCollector::new()),
///     Arc::new(StructuredLogger::new()),
/// );
/// hooks.on_signal_created("s1");
///
/// let snapshot = hooks.metrics().get_metrics_snapshot();
/// assert_eq!(snapshot.counters["signals_created_total"], 1);
/// assert_eq!(snapshot.gauges["signals_in_state_pending"], 1);
/// ```
#[derive(Clone, Debug)]
pub struct ObservabilityHooks {
    metrics: Arc<MetricsCollector>,
    logger: Arc<StructuredLogger>,
}

impl ObservabilityHooks {
    pub fn new(metrics: Arc<MetricsCollector>, logger: Arc<StructuredLogger>) -> Self {
        Self { metrics, logger }
    }

    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    pub fn logger(&self) -> &Arc<StructuredLogger> {
        &self.logger
    }

    /// A new signal entered the lifecycle in `Pending`.
    pub fn on_signal_created(&self, signal_id: &str) {
        self.metrics.increment_counter(Counter::SignalsCreated);
        self.metrics.increment_gauge(SignalState::Pending);
        info!(signal_id, "signal created");
    }

    pub fn on_signal_rejected(&self, signal_id: &str, reason: &str) {
        self.metrics.increment_counter(Counter::SignalsRejected);
        info!(signal_id, reason, "signal rejected");
    }

    pub fn on_signal_expired(&self, signal_id: &str) {
        self.metrics.increment_counter(Counter::SignalsExpired);
        info!(signal_id, "signal expired");
    }

    pub fn on_signal_cancelled(&self, signal_id: &str) {
        self.metrics.increment_counter(Counter::SignalsCancelled);
        info!(signal_id, "signal cancelled");
    }

    /// Move the state gauges, record the optional latency, then log.
    pub fn on_state_transition(&self, record: &TransitionRecord, latency_seconds: Option<f64>) {
        self.metrics
            .move_gauge(record.prev_state, record.next_state);
        if let Some(seconds) = latency_seconds {
            self.metrics
                .record_histogram(Histogram::StateTransitionLatency, seconds);
        }
        self.logger.log_transition(record);
    }

    pub fn on_dispatch_acknowledged(&self, signal_id: &str, latency_seconds: f64) {
        self.metrics
            .record_histogram(Histogram::DispatchToAckLatency, latency_seconds);
        debug!(signal_id, latency_seconds, "dispatch acknowledged");
    }
}
