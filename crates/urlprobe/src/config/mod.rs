//! Configuration document loading.
//!
//! The document is JSON, or TOML when the file has a `.toml` extension:
//!
//! ```json
//! {
//!   "version": 1,
//!   "preferences": { "timeoutSeconds": 10 },
//!   "tests": [{
//!     "name": "home",
//!     "friendlyName": "City Homepage",
//!     "url": "https://www.example.com/",
//!     "pollingInterval": 60,
//!     "successCondition": [
//!       { "type": "responseCode", "exact": 200 },
//!       { "type": "responseSize", "minimum": 22000, "maximum": 30000 },
//!       { "type": "contentMatch", "matches": ["Welcome"] }
//!     ]
//!   }]
//! }
//! ```

mod types;
mod validation;

use std::path::Path;
use std::time::Duration;
use std::{fmt, fs};

use serde_json::Value;
use tracing::info;

use self::types::{RawConfig, RawPreferences};
use self::validation::{
    parse_condition, validate_names, validate_redirects, validate_timeout, validate_url,
};
use crate::check::CheckDefinition;
use crate::error::ConfigError;
use crate::probe::ProberSettings;

/// The only configuration version this agent understands.
pub const SUPPORTED_VERSION: i64 = 1;

/// Default probe timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Serialisation format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Agent-wide probe preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub timeout: Duration,
    pub follow_redirects: usize,
    pub user_agent: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            follow_redirects: 0,
            user_agent: None,
        }
    }
}

impl Preferences {
    pub fn prober_settings(&self) -> ProberSettings {
        let mut settings = ProberSettings {
            timeout: self.timeout,
            max_redirects: self.follow_redirects,
            ..ProberSettings::default()
        };
        if let Some(user_agent) = &self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        settings
    }

    fn from_raw(raw: RawPreferences) -> Result<Self, ConfigError> {
        Ok(Self {
            timeout: validate_timeout(raw.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))?,
            follow_redirects: validate_redirects(raw.follow_redirects.unwrap_or_default())?,
            user_agent: raw.user_agent,
        })
    }
}

/// A validated configuration document.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub preferences: Preferences,
    pub checks: Vec<CheckDefinition>,
}

impl AgentConfig {
    /// Read, parse and validate the document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading configuration file {}", path.display());

        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

        if text.trim().is_empty() {
            return Err(ConfigError::Empty(path.to_path_buf()));
        }

        Self::parse(&text, ConfigFormat::from_path(path))
    }

    /// Parse and validate a document held in memory.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let document: Value = match format {
            ConfigFormat::Json => {
                serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            ConfigFormat::Toml => {
                toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        };

        check_version(&document)?;

        let raw: RawConfig =
            serde_json::from_value(document).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if raw.tests.is_empty() {
            return Err(ConfigError::NoTests);
        }
        validate_names(raw.tests.iter().map(|test| test.name.as_str()))?;

        let mut checks = Vec::with_capacity(raw.tests.len());
        for test in raw.tests {
            let url = validate_url(&test.name, &test.url)?;
            if test.polling_interval == 0 {
                return Err(ConfigError::ZeroInterval { name: test.name });
            }

            let conditions = test
                .success_condition
                .iter()
                .map(parse_condition)
                .collect::<Result<Vec<_>, _>>()?;

            let friendly_name = test.friendly_name.unwrap_or_else(|| test.name.clone());
            checks.push(CheckDefinition::new(
                test.name,
                friendly_name,
                url,
                test.polling_interval,
                conditions,
            ));
        }

        let config = Self { preferences: Preferences::from_raw(raw.preferences)?, checks };
        info!("Configuration data is valid ({} tests)", config.checks.len());
        Ok(config)
    }
}

fn check_version(document: &Value) -> Result<(), ConfigError> {
    let version = document.get("version").ok_or(ConfigError::MissingVersion)?;

    match version.as_i64() {
        Some(SUPPORTED_VERSION) => Ok(()),
        Some(other) => Err(ConfigError::UnsupportedVersion(other)),
        None => Err(ConfigError::Parse(format!("'version' must be an integer, got {version}"))),
    }
}

impl fmt::Display for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);
        let write_2 = write_indented(2);

        writeln!(f, "Configuration (version {SUPPORTED_VERSION}):")?;
        write_title_1(f, "Preferences")?;
        write_1(f, "Timeout", &format!("{}s", self.preferences.timeout.as_secs()))?;
        write_1(f, "Follow Redirects", &self.preferences.follow_redirects)?;

        for check in &self.checks {
            write_title_1(f, &format!("Test '{}' ({})", check.name, check.friendly_name))?;
            write_1(f, "URL", &check.url)?;
            write_1(f, "Interval", &format!("{}s", check.polling_interval.as_secs()))?;
            write_1(f, "Conditions", &check.conditions.len())?;
            for condition in &check.conditions {
                write_2(f, condition.kind(), condition)?;
            }
        }

        Ok(())
    }
}
