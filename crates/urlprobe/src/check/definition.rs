use std::time::Duration;

use url::Url;

use crate::condition::ConditionSpec;

/// Immutable description of one recurring check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDefinition {
    /// Unique name
    pub name: String,
    /// Display name
    pub friendly_name: String,
    /// Absolute http or https URL
    pub url: Url,
    pub polling_interval: Duration,
    /// Conditions in declaration order
    pub conditions: Vec<ConditionSpec>,
}

impl CheckDefinition {
    pub fn new(
        name: impl Into<String>,
        friendly_name: impl Into<String>,
        url: Url,
        polling_interval_seconds: u64,
        conditions: Vec<ConditionSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            friendly_name: friendly_name.into(),
            url,
            polling_interval: Duration::from_secs(polling_interval_seconds),
            conditions,
        }
    }
}
