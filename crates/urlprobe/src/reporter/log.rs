use tracing::{info, warn};

use super::Reporter;
use crate::check::CheckOutcome;

/// Emits outcomes as structured tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, outcome: &CheckOutcome) {
        let elapsed_ms = outcome.elapsed_millis.unwrap_or_default();

        if outcome.overall_pass {
            info!(
                check = %outcome.check_name,
                status = outcome.status_code,
                elapsed_ms,
                "PASS {}",
                outcome.friendly_name
            );
            return;
        }

        warn!(
            check = %outcome.check_name,
            status = outcome.status_code,
            elapsed_ms,
            "FAIL {}",
            outcome.friendly_name
        );
        for failed in outcome.failed_conditions() {
            warn!(check = %outcome.check_name, condition = failed.spec.kind(), "{}", failed.detail);
        }
    }
}
