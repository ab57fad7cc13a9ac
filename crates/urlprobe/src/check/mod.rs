//! Checks and their execution lifecycle.
//!
//! A [`Check`] is either idle or running. A tick that arrives while the
//! check is running is dropped, so at most one probe per check is ever in
//! flight.

mod definition;
mod outcome;

pub use definition::CheckDefinition;
pub use outcome::{CheckOutcome, ConditionRecord, OutcomeRecord};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::condition::{evaluate_all, fail_all};
use crate::probe::Prober;
use crate::reporter::Reporter;

/// A configured check bound to its prober and reporter.
pub struct Check {
    definition: CheckDefinition,
    prober: Arc<dyn Prober>,
    reporter: Arc<dyn Reporter>,
    running: AtomicBool,
    execution_count: AtomicU64,
}

impl Check {
    pub fn new(
        definition: CheckDefinition,
        prober: Arc<dyn Prober>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            definition,
            prober,
            reporter,
            running: AtomicBool::new(false),
            execution_count: AtomicU64::new(0),
        }
    }

    pub fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Whether an execution is currently in flight.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Number of executions started so far.
    pub fn execution_count(&self) -> u64 {
        self.execution_count.load(Ordering::Relaxed)
    }

    /// Run one tick: probe, evaluate, report.
    ///
    /// Returns `None` without probing if another execution of this check is
    /// still running.
    pub async fn execute(&self) -> Option<CheckOutcome> {
        let Some(_slot) = RunningSlot::acquire(&self.running) else {
            debug!(check = %self.definition.name, "previous execution still running, tick dropped");
            return None;
        };

        let execution = self.execution_count.fetch_add(1, Ordering::Relaxed) + 1;
        let definition = &self.definition;

        let outcome = match self.prober.probe(&definition.url).await {
            Ok(result) => {
                let conditions = evaluate_all(&definition.conditions, &result);
                CheckOutcome::completed(definition, execution, &result, conditions)
            }
            Err(error) => {
                warn!(check = %definition.name, url = %definition.url, %error, "probe failed");
                let conditions = fail_all(&definition.conditions, &error);
                CheckOutcome::probe_failed(definition, execution, error, conditions)
            }
        };

        self.reporter.report(&outcome);
        Some(outcome)
    }
}

/// Marks a check as running until dropped.
struct RunningSlot<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunningSlot<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).ok()?;
        Some(Self { flag })
    }
}

impl Drop for RunningSlot<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
