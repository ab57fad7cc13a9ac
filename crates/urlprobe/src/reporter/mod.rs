//! Outcome sinks.
//!
//! Reporters are shared by every check, so implementations must tolerate
//! concurrent calls.

mod channel;
mod file;
mod log;

pub use channel::ChannelReporter;
pub use file::FileReporter;
pub use log::TracingReporter;

use std::sync::Arc;

use crate::check::CheckOutcome;

/// Consumes check outcomes.
pub trait Reporter: Send + Sync {
    fn report(&self, outcome: &CheckOutcome);
}

/// Forwards each outcome to several reporters in order.
#[derive(Default, Clone)]
pub struct Fanout {
    reporters: Vec<Arc<dyn Reporter>>,
}

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporters.push(reporter);
        self
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

impl Reporter for Fanout {
    fn report(&self, outcome: &CheckOutcome) {
        for reporter in &self.reporters {
            reporter.report(outcome);
        }
    }
}
