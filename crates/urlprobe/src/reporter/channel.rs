use tokio::sync::mpsc;
use tracing::error;

use super::Reporter;
use crate::check::CheckOutcome;

/// Sends outcomes over an unbounded channel.
///
/// Every outcome is delivered while the receiver is alive. Once the
/// receiver is dropped, outcomes are logged and discarded.
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<CheckOutcome>,
}

impl ChannelReporter {
    pub fn new(tx: mpsc::UnboundedSender<CheckOutcome>) -> Self {
        Self { tx }
    }
}

impl Reporter for ChannelReporter {
    fn report(&self, outcome: &CheckOutcome) {
        if let Err(e) = self.tx.send(outcome.clone()) {
            error!("Failed to send check outcome for {}: {}", outcome.check_name, e);
        }
    }
}
