//! Scheduler timing tests, run on tokio's paused clock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FailingProber, RecordingReporter, SlowProber, definition};
use tokio::sync::mpsc;
use tokio::time::sleep;
use urlprobe::{ChannelReporter, ConditionSpec, ProbeError, Scheduler};

#[tokio::test(start_paused = true)]
async fn test_first_execution_is_immediate() {
    let prober = Arc::new(SlowProber::new(Duration::ZERO));
    let reporter = Arc::new(RecordingReporter::default());
    let scheduler = Scheduler::new(
        vec![
            definition("a", "http://a.example/", 60, vec![]),
            definition("b", "http://b.example/", 300, vec![]),
        ],
        prober.clone(),
        reporter.clone(),
    );

    let handle = scheduler.start();
    sleep(Duration::from_millis(10)).await;

    assert_eq!(handle.len(), 2);
    assert_eq!(reporter.count_for("a"), 1);
    assert_eq!(reporter.count_for("b"), 1);
    handle.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_checks_keep_independent_intervals() {
    let prober = Arc::new(SlowProber::new(Duration::ZERO));
    let reporter = Arc::new(RecordingReporter::default());
    let scheduler = Scheduler::new(
        vec![
            definition("fast", "http://fast.example/", 1, vec![]),
            definition("slow", "http://slow.example/", 3, vec![]),
        ],
        prober,
        reporter.clone(),
    );

    let handle = scheduler.start();
    sleep(Duration::from_millis(6_500)).await;
    handle.shutdown();

    // Ticks at 0..=6 and at 0, 3, 6
    assert_eq!(reporter.count_for("fast"), 7);
    assert_eq!(reporter.count_for("slow"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_slow_probe_never_overlaps() {
    let prober = Arc::new(SlowProber::new(Duration::from_millis(3_500)));
    let reporter = Arc::new(RecordingReporter::default());
    let scheduler = Scheduler::new(
        vec![definition("slow-endpoint", "http://slow.example/", 1, vec![])],
        prober.clone(),
        reporter.clone(),
    );

    let handle = scheduler.start();
    sleep(Duration::from_secs(10)).await;
    handle.shutdown();

    assert_eq!(prober.max_in_flight(), 1);
    // Executions start at 0s, 4s and 8s; ticks in between are dropped
    assert_eq!(prober.calls(), 3);
    assert_eq!(scheduler.checks()[0].execution_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_checks_run_concurrently() {
    let prober = Arc::new(SlowProber::new(Duration::from_secs(2)));
    let reporter = Arc::new(RecordingReporter::default());
    let definitions = (0..4)
        .map(|i| definition(&format!("check-{i}"), "http://example.com/", 60, vec![]))
        .collect();
    let scheduler = Scheduler::new(definitions, prober.clone(), reporter.clone());

    let handle = scheduler.start();
    sleep(Duration::from_millis(2_500)).await;
    handle.shutdown();

    assert_eq!(prober.max_in_flight(), 4);
    assert_eq!(reporter.outcomes().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_outcomes_flow_through_channel() {
    let prober = Arc::new(SlowProber::new(Duration::from_millis(5)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let scheduler = Scheduler::new(
        vec![definition(
            "channel",
            "http://example.com/",
            30,
            vec![ConditionSpec::StatusCodeExact { code: 200 }],
        )],
        prober,
        Arc::new(ChannelReporter::new(tx)),
    );

    let handle = scheduler.start();
    let outcome = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("Timeout waiting for outcome")
        .expect("Channel closed");
    handle.shutdown();

    assert_eq!(outcome.check_name, "channel");
    assert!(outcome.overall_pass);
}

#[tokio::test(start_paused = true)]
async fn test_run_until_stops_on_shutdown_signal() {
    let prober = Arc::new(SlowProber::new(Duration::ZERO));
    let reporter = Arc::new(RecordingReporter::default());
    let scheduler = Scheduler::new(
        vec![definition("short", "http://example.com/", 1, vec![])],
        prober.clone(),
        reporter.clone(),
    );

    scheduler.run_until(sleep(Duration::from_millis(2_500))).await;
    let after_shutdown = reporter.outcomes().len();
    sleep(Duration::from_secs(5)).await;

    assert_eq!(after_shutdown, 3);
    assert_eq!(reporter.outcomes().len(), after_shutdown);
}

#[tokio::test(start_paused = true)]
async fn test_failing_check_keeps_its_schedule() {
    let reporter = Arc::new(RecordingReporter::default());
    let scheduler = Scheduler::new(
        vec![definition(
            "refused",
            "http://refused.example/",
            1,
            vec![
                ConditionSpec::StatusCodeExact { code: 200 },
                ConditionSpec::ContentMatch { terms: vec!["Welcome".into()] },
            ],
        )],
        Arc::new(FailingProber(ProbeError::ConnectionRefused)),
        reporter.clone(),
    );

    let handle = scheduler.start();
    sleep(Duration::from_millis(3_500)).await;
    handle.shutdown();

    let outcomes = reporter.outcomes();
    assert_eq!(outcomes.len(), 4);
    assert_eq!(scheduler.checks()[0].execution_count(), 4);
    for (index, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.execution, index as u64 + 1);
        assert!(!outcome.overall_pass);
        assert_eq!(outcome.probe_error, Some(ProbeError::ConnectionRefused));
        assert_eq!(outcome.condition_results.len(), 2);
        for result in &outcome.condition_results {
            assert!(!result.passed);
            assert_eq!(result.detail, "probe failed: connection refused");
        }
    }
    assert!(!scheduler.checks()[0].is_running());
}
