//! Shared fixtures for urlprobe integration tests.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::Semaphore;
use url::Url;

use urlprobe::{
    CheckDefinition, CheckOutcome, ConditionSpec, ProbeError, ProbeResult, Prober, Reporter,
};

pub fn definition(
    name: &str,
    url: &str,
    interval_seconds: u64,
    conditions: Vec<ConditionSpec>,
) -> CheckDefinition {
    CheckDefinition::new(name, name, Url::parse(url).unwrap(), interval_seconds, conditions)
}

/// Keeps every outcome it receives.
#[derive(Default)]
pub struct RecordingReporter {
    outcomes: Mutex<Vec<CheckOutcome>>,
}

impl RecordingReporter {
    pub fn outcomes(&self) -> Vec<CheckOutcome> {
        self.outcomes.lock().unwrap().clone()
    }

    pub fn count_for(&self, name: &str) -> usize {
        self.outcomes.lock().unwrap().iter().filter(|o| o.check_name == name).count()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, outcome: &CheckOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}

/// Answers 200 after a fixed delay and tracks how many probes overlap.
pub struct SlowProber {
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl SlowProber {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Prober for SlowProber {
    async fn probe(&self, _url: &Url) -> Result<ProbeResult, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(ProbeResult::new(200, "ok", self.delay.as_millis() as u64))
    }
}

/// Blocks every probe until a permit is released.
pub struct GatedProber {
    pub gate: Semaphore,
}

impl GatedProber {
    pub fn new() -> Self {
        Self { gate: Semaphore::new(0) }
    }
}

#[async_trait::async_trait]
impl Prober for GatedProber {
    async fn probe(&self, _url: &Url) -> Result<ProbeResult, ProbeError> {
        let permit = self.gate.acquire().await.map_err(|e| ProbeError::Transport(e.to_string()))?;
        permit.forget();
        Ok(ProbeResult::new(200, "released", 1))
    }
}

/// Always fails with the given error.
pub struct FailingProber(pub ProbeError);

#[async_trait::async_trait]
impl Prober for FailingProber {
    async fn probe(&self, _url: &Url) -> Result<ProbeResult, ProbeError> {
        Err(self.0.clone())
    }
}
