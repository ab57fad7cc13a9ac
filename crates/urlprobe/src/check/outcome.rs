use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CheckDefinition;
use crate::condition::ConditionResult;
use crate::error::ProbeError;
use crate::probe::ProbeResult;

/// Aggregated result of one tick of a check.
///
/// Built once per execution and handed to the reporter; never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Unique name of the check
    pub check_name: String,

    /// Display name of the check
    pub friendly_name: String,

    /// 1-based ordinal of this execution
    pub execution: u64,

    /// When the execution finished
    pub timestamp: DateTime<Utc>,

    /// Logical AND of every condition (false if the probe failed)
    pub overall_pass: bool,

    /// HTTP status code, if the probe completed
    pub status_code: Option<u16>,

    /// Latency until the full body was received, if the probe completed
    pub elapsed_millis: Option<u64>,

    /// Why the probe could not complete
    pub probe_error: Option<ProbeError>,

    /// Per-condition results in declaration order
    pub condition_results: Vec<ConditionResult>,
}

impl CheckOutcome {
    fn new(definition: &CheckDefinition, execution: u64) -> Self {
        Self {
            check_name: definition.name.clone(),
            friendly_name: definition.friendly_name.clone(),
            execution,
            timestamp: Utc::now(),
            overall_pass: false,
            status_code: None,
            elapsed_millis: None,
            probe_error: None,
            condition_results: Vec::new(),
        }
    }

    /// Outcome of a probe that produced a response.
    pub fn completed(
        definition: &CheckDefinition,
        execution: u64,
        result: &ProbeResult,
        condition_results: Vec<ConditionResult>,
    ) -> Self {
        let mut outcome = Self::new(definition, execution);
        outcome.overall_pass = condition_results.iter().all(|c| c.passed);
        outcome.status_code = Some(result.status_code);
        outcome.elapsed_millis = Some(result.elapsed_millis);
        outcome.condition_results = condition_results;
        outcome
    }

    /// Outcome of a probe that never produced a response.
    pub fn probe_failed(
        definition: &CheckDefinition,
        execution: u64,
        error: ProbeError,
        condition_results: Vec<ConditionResult>,
    ) -> Self {
        let mut outcome = Self::new(definition, execution);
        outcome.probe_error = Some(error);
        outcome.condition_results = condition_results;
        outcome
    }

    pub fn failed_conditions(&self) -> impl Iterator<Item = &ConditionResult> {
        self.condition_results.iter().filter(|c| !c.passed)
    }

    /// Serialisable record handed to outcome sinks.
    pub fn record(&self) -> OutcomeRecord {
        OutcomeRecord {
            check_name: self.check_name.clone(),
            friendly_name: self.friendly_name.clone(),
            overall_pass: self.overall_pass,
            elapsed_millis: self.elapsed_millis,
            status_code: self.status_code,
            timestamp: self.timestamp,
            per_condition: self
                .condition_results
                .iter()
                .map(|c| ConditionRecord {
                    kind: c.spec.kind().to_string(),
                    passed: c.passed,
                    detail: c.detail.clone(),
                })
                .collect(),
        }
    }
}

/// Wire shape of an outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRecord {
    pub check_name: String,
    pub friendly_name: String,
    pub overall_pass: bool,
    pub elapsed_millis: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status_code: Option<u16>,
    pub timestamp: DateTime<Utc>,
    pub per_condition: Vec<ConditionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub passed: bool,
    pub detail: String,
}
