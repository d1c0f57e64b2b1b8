//! End-to-end lifecycle scenarios across every component.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;
use signal_lifecycle::audit::{first_broken_link, verify_event_chain, AuditEvent};
use signal_lifecycle::core::Metadata;
use signal_lifecycle::{
    LifecycleError, MetricsCollector, ObservabilityHooks, SignalAuditLogger, SignalState,
    SignalStateInvariantChecker, SignalStateMachine, StateInvariantError, StateTransitionError,
    StructuredLogger, TransitionContext, TransitionPipeline, TransitionPipelineBuilder,
    TransitionRecord, TransitionRequest,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn pipeline() -> TransitionPipeline {
    init_tracing();
    TransitionPipelineBuilder::new()
        .audit_logger(Arc::new(SignalAuditLogger::new()))
        .hooks(ObservabilityHooks::new(
            Arc::new(MetricsCollector::new()),
            Arc::new(StructuredLogger::new()),
        ))
        .default_actor("orchestrator")
        .build()
        .unwrap()
}

#[test]
fn machine_rejects_backward_move_and_keeps_state() {
    let mut fsm = SignalStateMachine::new();
    fsm.transition(SignalState::Validated).unwrap();

    let err = fsm.transition(SignalState::Pending).unwrap_err();

    assert_eq!(err.to_string(), "Invalid transition: validated->pending");
    assert_eq!(fsm.state(), SignalState::Validated);
}

#[test]
fn checker_names_the_failed_phase2_gate() {
    let checker = SignalStateInvariantChecker::new();
    let err = checker
        .validate(
            SignalState::Pending,
            SignalState::Validated,
            Some(&TransitionContext::new().phase2_passed(false)),
        )
        .unwrap_err();

    assert_eq!(err, StateInvariantError::Phase2NotPassed);
    assert!(err.to_string().contains("phase2_passed=False"));
}

#[test]
fn reordered_events_fail_verification() {
    let logger = SignalAuditLogger::new();
    let e1 = logger
        .append_event(TransitionRecord::new(
            "s1",
            SignalState::Pending,
            SignalState::Validated,
            "sys",
            "ok",
        ))
        .unwrap();
    let e2 = logger
        .append_event(TransitionRecord::new(
            "s1",
            SignalState::Validated,
            SignalState::Allocated,
            "sys",
            "ok",
        ))
        .unwrap();

    assert!(verify_event_chain(&[e1.clone(), e2.clone()]).unwrap());
    assert!(!verify_event_chain(&[e2.clone(), e1.clone()]).unwrap());
    assert_eq!(first_broken_link(&[e2, e1]).unwrap(), Some(0));
}

#[test]
fn created_hook_feeds_snapshot() {
    init_tracing();
    let hooks = ObservabilityHooks::new(
        Arc::new(MetricsCollector::new()),
        Arc::new(StructuredLogger::new()),
    );
    hooks.on_signal_created("s1");

    let snapshot = hooks.metrics().get_metrics_snapshot();
    assert_eq!(snapshot.counters["signals_created_total"], 1);
    assert_eq!(snapshot.gauges["signals_in_state_pending"], 1);
}

#[test]
fn cancelled_signal_is_final_everywhere() {
    let pipeline = pipeline();
    let mut fsm = pipeline.start_signal("s-cancel");

    pipeline
        .apply(
            &mut fsm,
            TransitionRequest::new("s-cancel", SignalState::Cancelled, "operator abort")
                .actor("operator"),
        )
        .unwrap();
    pipeline.hooks().on_signal_cancelled("s-cancel");

    let err = pipeline
        .apply(
            &mut fsm,
            TransitionRequest::new("s-cancel", SignalState::Validated, "retry"),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::Invariant(StateInvariantError::TerminalState { .. })
    ));

    let snapshot = pipeline.hooks().metrics().get_metrics_snapshot();
    assert_eq!(snapshot.counters["signals_cancelled_total"], 1);
    assert_eq!(snapshot.gauges["signals_in_state_cancelled"], 1);
    assert_eq!(snapshot.gauges["signals_in_state_pending"], 0);
    assert_eq!(pipeline.audit_logger().len(), 1);
}

#[test]
fn failed_execution_records_metadata_and_dispatch_latency() {
    let pipeline = pipeline();
    let mut fsm = pipeline.start_signal("s-fail");

    let steps = [
        (
            SignalState::Validated,
            TransitionContext::new().phase2_passed(true),
        ),
        (
            SignalState::Allocated,
            TransitionContext::new().execution_allowed(true),
        ),
        (
            SignalState::Executing,
            TransitionContext::new().dispatch_timestamp("2024-05-01T09:30:00Z"),
        ),
    ];
    for (to, context) in steps {
        pipeline
            .apply(
                &mut fsm,
                TransitionRequest::new("s-fail", to, "advance")
                    .context(context)
                    .latency_seconds(0.01),
            )
            .unwrap();
    }
    pipeline.hooks().on_dispatch_acknowledged("s-fail", 0.12);

    let mut metadata = Metadata::new();
    metadata.insert("broker_error".into(), json!("insufficient margin"));
    let event = pipeline
        .apply(
            &mut fsm,
            TransitionRequest::new("s-fail", SignalState::Failed, "broker rejected")
                .metadata(metadata.clone()),
        )
        .unwrap();

    assert_eq!(fsm.state(), SignalState::Failed);
    assert_eq!(event.metadata(), &metadata);
    assert_eq!(event.actor(), "orchestrator");

    let snapshot = pipeline.hooks().metrics().get_metrics_snapshot();
    let summary = snapshot
        .histogram_summary("state_transition_latency_samples")
        .unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(
        snapshot.histograms["dispatch_to_ack_latency_samples"],
        vec![0.12]
    );
    assert!(pipeline.audit_logger().verify().unwrap());
}

#[test]
fn rejected_attempts_leave_no_trace() {
    let pipeline = pipeline();
    let mut fsm = pipeline.start_signal("s1");
    let before = pipeline.hooks().metrics().get_metrics_snapshot();

    let attempts = [
        TransitionRequest::new("s1", SignalState::Validated, "gate closed")
            .context(TransitionContext::new().phase2_passed(false)),
        TransitionRequest::new("s1", SignalState::Failed, "too early"),
        TransitionRequest::new("s1", SignalState::Executing, "skip ahead"),
        TransitionRequest::new("s1", SignalState::Validated, "done")
            .context(TransitionContext::new().terminal_reached(true)),
        TransitionRequest::new("s1", SignalState::Validated, "bad id")
            .context(TransitionContext::new().with("signal_id", 42)),
    ];
    for attempt in attempts {
        assert!(pipeline.apply(&mut fsm, attempt).is_err());
    }

    assert_eq!(fsm.state(), SignalState::Pending);
    assert!(pipeline.audit_logger().is_empty());
    assert!(pipeline.hooks().logger().get_logs(None).is_empty());
    assert_eq!(pipeline.hooks().metrics().get_metrics_snapshot(), before);
}

#[test]
fn interleaved_signals_share_one_chain() {
    let pipeline = pipeline();
    let mut a = pipeline.start_signal("a");
    let mut b = pipeline.start_signal("b");

    pipeline
        .apply(&mut a, TransitionRequest::new("a", SignalState::Validated, "ok"))
        .unwrap();
    pipeline
        .apply(&mut b, TransitionRequest::new("b", SignalState::Cancelled, "stale"))
        .unwrap();
    pipeline
        .apply(&mut a, TransitionRequest::new("a", SignalState::Allocated, "ok"))
        .unwrap();

    let audit = pipeline.audit_logger();
    let all = audit.get_events(None);
    assert_eq!(all.len(), 3);
    assert!(verify_event_chain(&all).unwrap());

    // A per-signal slice is not a chain on its own.
    let only_a = audit.get_events(Some("a"));
    assert_eq!(only_a.len(), 2);
    assert!(!verify_event_chain(&only_a).unwrap());

    assert_eq!(audit.last_hash(), all[2].event_hash());
    assert_eq!(pipeline.hooks().logger().get_logs(Some("b")).len(), 1);
}

#[test]
fn spliced_event_breaks_the_following_link() {
    let logger = SignalAuditLogger::new();
    let at = |s| Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, s).unwrap();
    for (i, (from, to)) in [
        (SignalState::Pending, SignalState::Validated),
        (SignalState::Validated, SignalState::Allocated),
        (SignalState::Allocated, SignalState::Executing),
    ]
    .into_iter()
    .enumerate()
    {
        logger
            .append_event(TransitionRecord::new("s1", from, to, "sys", "ok").timestamp(at(i as u32)))
            .unwrap();
    }

    // Forge a replacement for the middle event that carries a self-consistent
    // hash: its own link verifies, the next one does not.
    let mut events = logger.get_events(None);
    let mut raw = serde_json::to_value(&events[1]).unwrap();
    raw["reason"] = json!("rewritten");
    let forged: AuditEvent = serde_json::from_value(raw).unwrap();
    let rehash = forged.recompute_hash(events[0].event_hash()).unwrap();
    let mut raw = serde_json::to_value(&forged).unwrap();
    raw["event_hash"] = json!(rehash);
    events[1] = serde_json::from_value(raw).unwrap();

    assert_eq!(first_broken_link(&events).unwrap(), Some(2));
    assert!(!verify_event_chain(&events).unwrap());
}

#[test]
fn malformed_events_are_reported_as_errors() {
    let logger = SignalAuditLogger::new();
    logger
        .append_event(TransitionRecord::new(
            "s1",
            SignalState::Pending,
            SignalState::Validated,
            "sys",
            "ok",
        ))
        .unwrap();

    let mut raw = serde_json::to_value(&logger.get_events(None)[0]).unwrap();
    raw["event_hash"] = json!("not-a-digest");
    let broken: AuditEvent = serde_json::from_value(raw).unwrap();

    assert!(verify_event_chain(&[broken]).is_err());
}

#[test]
fn table_and_checker_disagree_only_on_skips() {
    // The checker admits any forward jump; the table admits single steps.
    let checker = SignalStateInvariantChecker::new();
    assert!(checker
        .validate(SignalState::Pending, SignalState::Active, None)
        .is_ok());

    let mut fsm = SignalStateMachine::new();
    assert_eq!(
        fsm.transition(SignalState::Active),
        Err(StateTransitionError::InvalidTransition {
            from: SignalState::Pending,
            to: SignalState::Active,
        })
    );
}
