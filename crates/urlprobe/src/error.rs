//! Error taxonomy for urlprobe.
//!
//! Configuration errors are fatal and surface before anything is scheduled.
//! Probe and condition errors are contained within a single tick.

use std::io::Error as IoError;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while loading or validating a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("configuration file {} is empty", .0.display())]
    Empty(PathBuf),
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("configuration is missing the 'version' key")]
    MissingVersion,
    #[error("unknown configuration version {0}")]
    UnsupportedVersion(i64),
    #[error("configuration defines no tests")]
    NoTests,
    #[error("test #{index} has an empty name")]
    EmptyName { index: usize },
    #[error("duplicate test name '{0}'")]
    DuplicateName(String),
    #[error("test '{name}': invalid url '{url}': {reason}")]
    InvalidUrl { name: String, url: String, reason: String },
    #[error("test '{name}': polling interval must be greater than zero")]
    ZeroInterval { name: String },
    #[error("invalid '{kind}' condition: {reason}")]
    Condition { kind: String, reason: String },
    #[error("invalid preference '{key}': {reason}")]
    Preference { key: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn condition(kind: &str, reason: impl Into<String>) -> Self {
        Self::Condition { kind: kind.to_string(), reason: reason.into() }
    }
}

/// A probe that could not produce a response.
///
/// The `Display` output is the human readable cause embedded in
/// `probe failed: <cause>` condition details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection refused")]
    ConnectionRefused,
    #[error("connection reset")]
    ConnectionReset,
    #[error("dns lookup failed: {0}")]
    Dns(String),
    #[error("connect failed: {0}")]
    Connect(String),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("unsupported url scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("{0}")]
    Transport(String),
}

/// Failure to evaluate a single condition.
#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("unsupported condition type '{kind}'")]
    Unsupported { kind: String },
    #[error("malformed response: {reason}")]
    Evaluation { reason: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
