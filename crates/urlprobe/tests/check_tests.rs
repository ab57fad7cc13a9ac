//! End-to-end check executions.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FailingProber, GatedProber, RecordingReporter, definition};
use urlprobe::{Check, ConditionSpec, HttpProber, ProbeError, ProberSettings};

fn http_prober() -> Arc<HttpProber> {
    Arc::new(HttpProber::new(&ProberSettings::default()).unwrap())
}

#[tokio::test]
async fn test_passing_status_check() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/ok").with_status(200).with_body("y".repeat(50)).create_async().await;

    let reporter = Arc::new(RecordingReporter::default());
    let check = Check::new(
        definition(
            "ok",
            &format!("{}/ok", server.url()),
            60,
            vec![ConditionSpec::StatusCodeExact { code: 200 }],
        ),
        http_prober(),
        reporter.clone(),
    );

    let outcome = check.execute().await.expect("check was idle");

    assert!(outcome.overall_pass);
    assert_eq!(outcome.status_code, Some(200));
    assert_eq!(outcome.execution, 1);
    assert_eq!(reporter.outcomes().len(), 1);
    assert!(!check.is_running());
}

#[tokio::test]
async fn test_size_on_exclusive_bound_fails() {
    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/sized").with_status(200).with_body("z".repeat(100)).create_async().await;

    let reporter = Arc::new(RecordingReporter::default());
    let check = Check::new(
        definition(
            "sized",
            &format!("{}/sized", server.url()),
            60,
            vec![ConditionSpec::ResponseSize { min: Some(100), max: Some(200) }],
        ),
        http_prober(),
        reporter,
    );

    let outcome = check.execute().await.unwrap();

    assert!(!outcome.overall_pass);
    let detail = &outcome.condition_results[0].detail;
    assert!(detail.contains("exclusive range (100, 200)"), "unexpected detail: {detail}");
}

#[tokio::test]
async fn test_connection_refused_fails_every_condition() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let reporter = Arc::new(RecordingReporter::default());
    let check = Check::new(
        definition(
            "down",
            &format!("http://127.0.0.1:{port}/"),
            60,
            vec![
                ConditionSpec::StatusCodeExact { code: 200 },
                ConditionSpec::ContentMatch { terms: vec!["Foundry".into()] },
            ],
        ),
        http_prober(),
        reporter.clone(),
    );

    let outcome = check.execute().await.unwrap();

    assert!(!outcome.overall_pass);
    assert_eq!(outcome.probe_error, Some(ProbeError::ConnectionRefused));
    assert_eq!(outcome.condition_results.len(), 2);
    for result in &outcome.condition_results {
        assert!(!result.passed);
        assert_eq!(result.detail, "probe failed: connection refused");
    }

    // Still usable for the next tick
    assert!(!check.is_running());
    assert!(check.execute().await.is_some());
    assert_eq!(check.execution_count(), 2);
    assert_eq!(reporter.outcomes().len(), 2);
}

#[tokio::test]
async fn test_missing_content_term_fails() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .with_status(200)
        .with_body("<h1>Keyword search: Foundry</h1>")
        .create_async()
        .await;

    let check = Check::new(
        definition(
            "search",
            &format!("{}/search", server.url()),
            60,
            vec![ConditionSpec::ContentMatch { terms: vec!["Foundry".into(), "2024".into()] }],
        ),
        http_prober(),
        Arc::new(RecordingReporter::default()),
    );

    let outcome = check.execute().await.unwrap();

    assert!(!outcome.overall_pass);
    assert_eq!(outcome.condition_results[0].detail, "missing terms: 2024");
}

#[tokio::test]
async fn test_conditions_reported_in_declaration_order() {
    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/").with_status(503).with_body("maintenance").create_async().await;

    let conditions = vec![
        ConditionSpec::StatusCodeSeries { leading_digit: '2' },
        ConditionSpec::Unsupported { kind: "certificateExpiry".into() },
        ConditionSpec::ContentMatch { terms: vec!["maintenance".into()] },
    ];
    let check = Check::new(
        definition("ordered", &format!("{}/", server.url()), 60, conditions.clone()),
        http_prober(),
        Arc::new(RecordingReporter::default()),
    );

    let outcome = check.execute().await.unwrap();
    let specs: Vec<_> = outcome.condition_results.iter().map(|c| c.spec.clone()).collect();
    let passed: Vec<_> = outcome.condition_results.iter().map(|c| c.passed).collect();

    assert_eq!(specs, conditions);
    assert_eq!(passed, vec![false, false, true]);
    assert!(!outcome.overall_pass);
}

#[tokio::test]
async fn test_overlapping_execution_is_dropped() {
    let prober = Arc::new(GatedProber::new());
    let reporter = Arc::new(RecordingReporter::default());
    let check = Arc::new(Check::new(
        definition("gated", "http://example.invalid/", 1, vec![]),
        prober.clone(),
        reporter.clone(),
    ));

    let first = tokio::spawn({
        let check = check.clone();
        async move { check.execute().await }
    });

    tokio::time::timeout(Duration::from_secs(5), async {
        while !check.is_running() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("first execution never started");

    assert!(check.execute().await.is_none());
    assert_eq!(check.execution_count(), 1);

    prober.gate.add_permits(1);
    let outcome = first.await.unwrap().expect("first execution completes");

    assert!(outcome.overall_pass);
    assert_eq!(reporter.outcomes().len(), 1);
    assert!(!check.is_running());
}

#[tokio::test]
async fn test_probe_failure_without_conditions_still_fails() {
    let check = Check::new(
        definition("bare", "http://example.invalid/", 1, vec![]),
        Arc::new(FailingProber(ProbeError::Dns("no such host".into()))),
        Arc::new(RecordingReporter::default()),
    );

    let outcome = check.execute().await.unwrap();
    assert!(!outcome.overall_pass);
    assert!(outcome.condition_results.is_empty());
}
