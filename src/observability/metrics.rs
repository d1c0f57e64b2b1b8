//! In-process lifecycle metrics.

use crate::core::SignalState;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Monotonic lifecycle counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Counter {
    SignalsCreated,
    SignalsRejected,
    SignalsExpired,
    SignalsCancelled,
}

impl Counter {
    pub const ALL: [Counter; 4] = [
        Counter::SignalsCreated,
        Counter::SignalsRejected,
        Counter::SignalsExpired,
        Counter::SignalsCancelled,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::SignalsCreated => "signals_created_total",
            Self::SignalsRejected => "signals_rejected_total",
            Self::SignalsExpired => "signals_expired_total",
            Self::SignalsCancelled => "signals_cancelled_total",
        }
    }
}

/// Latency sample series, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Histogram {
    StateTransitionLatency,
    DispatchToAckLatency,
}

impl Histogram {
    pub const ALL: [Histogram; 2] = [
        Histogram::StateTransitionLatency,
        Histogram::DispatchToAckLatency,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::StateTransitionLatency => "state_transition_latency_samples",
            Self::DispatchToAckLatency => "dispatch_to_ack_latency_samples",
        }
    }
}

/// Name of the gauge tracking how many signals sit in `state`.
pub fn gauge_name(state: SignalState) -> String {
    format!("signals_in_state_{}", state.as_str())
}

#[derive(Debug, Default)]
struct Registry {
    counters: [u64; Counter::ALL.len()],
    gauges: [u64; SignalState::ALL.len()],
    histograms: [Vec<f64>; Histogram::ALL.len()],
}

/// Counters, per-state gauges and latency histograms for signal lifecycles.
///
/// One collector is created at bootstrap and shared by `Arc`. Every mutation
/// takes the write lock; [`get_metrics_snapshot`](Self::get_metrics_snapshot)
/// takes the read lock and copies. No operation fails: gauges clamp at zero
/// and unusable samples are dropped with a warning.
///
/// Histogram samples are kept for the collector's lifetime.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    registry: RwLock<Registry>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_counter(&self, counter: Counter) {
        let mut registry = self.registry.write();
        let slot = &mut registry.counters[counter as usize];
        *slot = slot.saturating_add(1);
    }

    pub fn increment_gauge(&self, state: SignalState) {
        let mut registry = self.registry.write();
        let slot = &mut registry.gauges[state.ordinal()];
        *slot = slot.saturating_add(1);
    }

    /// Decrement the gauge for `state`, never going below zero.
    pub fn decrement_gauge(&self, state: SignalState) {
        let mut registry = self.registry.write();
        let slot = &mut registry.gauges[state.ordinal()];
        if *slot == 0 {
            warn!(gauge = %gauge_name(state), "gauge decrement clamped at zero");
            return;
        }
        *slot -= 1;
    }

    /// Move one signal from the `from` gauge to the `to` gauge under a
    /// single write lock, so no snapshot sees it in neither state.
    ///
    /// The `from` gauge clamps at zero like [`decrement_gauge`](Self::decrement_gauge).
    pub fn move_gauge(&self, from: SignalState, to: SignalState) {
        let mut registry = self.registry.write();
        let source = &mut registry.gauges[from.ordinal()];
        if *source == 0 {
            warn!(gauge = %gauge_name(from), "gauge decrement clamped at zero");
        } else {
            *source -= 1;
        }
        let target = &mut registry.gauges[to.ordinal()];
        *target = target.saturating_add(1);
    }

    pub fn set_gauge(&self, state: SignalState, value: u64) {
        self.registry.write().gauges[state.ordinal()] = value;
    }

    /// Record a latency sample in seconds.
    ///
    /// Negative and non-finite samples are dropped.
    pub fn record_histogram(&self, histogram: Histogram, seconds: f64) {
        if !seconds.is_finite() || seconds < 0.0 {
            warn!(
                histogram = histogram.name(),
                sample = seconds,
                "dropping invalid latency sample"
            );
            return;
        }
        self.registry.write().histograms[histogram as usize].push(seconds);
    }

    pub fn counter(&self, counter: Counter) -> u64 {
        self.registry.read().counters[counter as usize]
    }

    pub fn gauge(&self, state: SignalState) -> u64 {
        self.registry.read().gauges[state.ordinal()]
    }

    /// Point-in-time copy of every metric.
    pub fn get_metrics_snapshot(&self) -> MetricsSnapshot {
        let registry = self.registry.read();
        MetricsSnapshot {
            counters: Counter::ALL
                .into_iter()
                .map(|c| (c.name().to_string(), registry.counters[c as usize]))
                .collect(),
            gauges: SignalState::ALL
                .into_iter()
                .map(|s| (gauge_name(s), registry.gauges[s.ordinal()]))
                .collect(),
            histograms: Histogram::ALL
                .into_iter()
                .map(|h| (h.name().to_string(), registry.histograms[h as usize].clone()))
                .collect(),
        }
    }

    /// Zero every metric. Only meant for test isolation.
    pub fn reset(&self) {
        *self.registry.write() = Registry::default();
    }
}

/// Copy of the collector's state at one instant.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub counters: BTreeMap<String, u64>,
    pub gauges: BTreeMap<String, u64>,
    pub histograms: BTreeMap<String, Vec<f64>>,
}

/// Summary statistics over one histogram's samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HistogramSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl MetricsSnapshot {
    /// Summarize the named histogram, or `None` if it has no samples.
    pub fn histogram_summary(&self, name: &str) -> Option<HistogramSummary> {
        let samples = self.histograms.get(name)?;
        if samples.is_empty() {
            return None;
        }
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        Some(HistogramSummary {
            count: samples.len(),
            min,
            max,
            mean,
        })
    }
}
