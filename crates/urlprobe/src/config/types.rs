//! Wire shapes of the configuration document.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConfig {
    #[serde(default)]
    pub preferences: RawPreferences,
    pub tests: Vec<RawTest>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPreferences {
    pub timeout_seconds: Option<u64>,
    pub follow_redirects: Option<usize>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTest {
    pub name: String,
    pub friendly_name: Option<String>,
    pub url: String,
    /// Seconds
    pub polling_interval: u64,
    #[serde(default)]
    pub success_condition: Vec<RawCondition>,
}

/// One `successCondition` entry.
///
/// Only `type` is decoded up front; the remaining fields are decoded per
/// type so unknown types may carry fields of any shape.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCondition {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawCondition {
    /// Decode the type-specific fields.
    pub fn fields<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| ConfigError::condition(&self.kind, e.to_string()))
    }
}

/// Fields of `responseCode` and `notResponseCode`.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusFields {
    pub exact: Option<u16>,
    pub series: Option<String>,
}

/// Fields of `responseSize`.
#[derive(Debug, Deserialize)]
pub(crate) struct SizeFields {
    pub minimum: Option<u64>,
    pub maximum: Option<u64>,
}

/// Fields of `contentMatch`.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentFields {
    pub matches: Vec<String>,
}
