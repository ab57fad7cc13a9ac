use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::error;

use super::Reporter;
use crate::check::CheckOutcome;

/// Appends one plain-text block per outcome to a log file.
///
/// ```text
/// [14:02:11]: FAIL	City Homepage	312ms
/// [14:02:11]: Failed on responseSize - body size 100 bytes outside exclusive range (100, 200)
/// ```
pub struct FileReporter {
    file: Mutex<File>,
}

impl FileReporter {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file) })
    }

    fn render(outcome: &CheckOutcome) -> String {
        let stamp = outcome.timestamp.with_timezone(&Local).format("%H:%M:%S");
        let verdict = if outcome.overall_pass { "PASS" } else { "FAIL" };
        let elapsed = outcome
            .elapsed_millis
            .map(|ms| format!("{ms}ms"))
            .unwrap_or_else(|| "-".to_string());

        let mut block = format!("[{stamp}]: {verdict}\t{}\t{elapsed}\n", outcome.friendly_name);
        for failed in outcome.failed_conditions() {
            block.push_str(&format!(
                "[{stamp}]: Failed on {} - {}\n",
                failed.spec.kind(),
                failed.detail
            ));
        }
        block
    }
}

impl Reporter for FileReporter {
    fn report(&self, outcome: &CheckOutcome) {
        let block = Self::render(outcome);

        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(block.as_bytes()) {
            error!("Failed to append outcome for {} to log file: {}", outcome.check_name, e);
        }
    }
}
