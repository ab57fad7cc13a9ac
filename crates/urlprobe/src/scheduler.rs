//! Scheduler - drives every check on its own timer.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::check::{Check, CheckDefinition};
use crate::probe::Prober;
use crate::reporter::Reporter;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Owns the checks and starts one independent timer per check.
pub struct Scheduler {
    checks: Vec<Arc<Check>>,
}

impl Scheduler {
    /// Build checks from validated definitions, sharing one prober and one
    /// reporter between them.
    pub fn new(
        definitions: Vec<CheckDefinition>,
        prober: Arc<dyn Prober>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        let checks = definitions
            .into_iter()
            .map(|definition| Arc::new(Check::new(definition, prober.clone(), reporter.clone())))
            .collect();

        Self { checks }
    }

    pub fn checks(&self) -> &[Arc<Check>] {
        &self.checks
    }

    /// Fire one immediate execution per check, then keep each on its interval.
    pub fn start(&self) -> SchedulerHandle {
        info!("Scheduling {} checks", self.checks.len());

        let handles = self.checks.iter().map(|check| schedule_check(check.clone())).collect();
        SchedulerHandle { handles }
    }

    /// Run every check until `shutdown` resolves.
    pub async fn run_until(&self, shutdown: impl Future<Output = ()>) {
        let handle = self.start();
        shutdown.await;
        info!("Shutting down scheduler");
        handle.shutdown();
    }
}

/// Running timers of a started [`Scheduler`].
pub struct SchedulerHandle {
    handles: Vec<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Stop all timers and abort executions still in flight.
    pub fn shutdown(self) {
        for handle in self.handles {
            handle.abort();
        }
    }
}

fn schedule_check(check: Arc<Check>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = check.definition().polling_interval.max(MIN_PERIOD);
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Dropping the set when this task is aborted aborts the execution too.
        let mut executions = JoinSet::new();

        loop {
            // The first tick completes immediately.
            timer.tick().await;
            while executions.try_join_next().is_some() {}

            if check.is_running() {
                debug!(check = %check.name(), "tick while running, dropped");
                continue;
            }

            let check = check.clone();
            executions.spawn(async move {
                check.execute().await;
            });
        }
    })
}
