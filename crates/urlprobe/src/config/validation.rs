//! Load-time validation of the configuration document.

use std::collections::HashSet;
use std::time::Duration;

use tracing::warn;
use url::Url;

use super::types::{ContentFields, RawCondition, SizeFields, StatusFields};
use crate::condition::ConditionSpec;
use crate::error::ConfigError;
use crate::probe::MAX_REDIRECT_HOPS;

/// Validate URL format and scheme
pub(crate) fn validate_url(name: &str, url: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        name: name.to_string(),
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(parsed)
}

/// Reject empty and duplicate test names
pub(crate) fn validate_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for (index, name) in names.into_iter().enumerate() {
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyName { index });
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateName(name.to_string()));
        }
    }

    Ok(())
}

/// Validate the probe timeout
pub(crate) fn validate_timeout(timeout_seconds: u64) -> Result<Duration, ConfigError> {
    const MIN_TIMEOUT: u64 = 1;
    const MAX_TIMEOUT: u64 = 300; // 5 minutes

    if !(MIN_TIMEOUT..=MAX_TIMEOUT).contains(&timeout_seconds) {
        return Err(ConfigError::Preference {
            key: "timeoutSeconds",
            reason: format!(
                "{timeout_seconds} is outside {MIN_TIMEOUT}..={MAX_TIMEOUT} seconds"
            ),
        });
    }

    Ok(Duration::from_secs(timeout_seconds))
}

/// Validate the redirect hop limit
pub(crate) fn validate_redirects(hops: usize) -> Result<usize, ConfigError> {
    if hops > MAX_REDIRECT_HOPS {
        return Err(ConfigError::Preference {
            key: "followRedirects",
            reason: format!("{hops} exceeds the maximum of {MAX_REDIRECT_HOPS} hops"),
        });
    }

    Ok(hops)
}

/// Resolve one wire condition into a [`ConditionSpec`].
pub(crate) fn parse_condition(raw: &RawCondition) -> Result<ConditionSpec, ConfigError> {
    match raw.kind.as_str() {
        "responseCode" => match status_target(raw)? {
            StatusTarget::Exact(code) => Ok(ConditionSpec::StatusCodeExact { code }),
            StatusTarget::Series(leading_digit) => {
                Ok(ConditionSpec::StatusCodeSeries { leading_digit })
            }
        },
        "notResponseCode" => match status_target(raw)? {
            StatusTarget::Exact(code) => Ok(ConditionSpec::StatusCodeNotExact { code }),
            StatusTarget::Series(leading_digit) => {
                Ok(ConditionSpec::StatusCodeNotSeries { leading_digit })
            }
        },
        "responseSize" => parse_size(raw),
        "contentMatch" => {
            let fields: ContentFields = raw.fields()?;
            Ok(ConditionSpec::ContentMatch { terms: fields.matches })
        }
        other => {
            warn!("Unsupported condition type '{}', it will always fail", other);
            Ok(ConditionSpec::Unsupported { kind: other.to_string() })
        }
    }
}

enum StatusTarget {
    Exact(u16),
    Series(char),
}

fn status_target(raw: &RawCondition) -> Result<StatusTarget, ConfigError> {
    let fields: StatusFields = raw.fields()?;

    // `exact` wins when both are present.
    if let Some(code) = fields.exact {
        if !(100..=999).contains(&code) {
            return Err(ConfigError::condition(
                &raw.kind,
                format!("status code {code} is not a three-digit code"),
            ));
        }
        return Ok(StatusTarget::Exact(code));
    }

    match fields.series.as_deref() {
        Some(series) => parse_series(series).map(StatusTarget::Series).ok_or_else(|| {
            ConfigError::condition(
                &raw.kind,
                format!("invalid series '{series}', expected e.g. '2xx'"),
            )
        }),
        None => Err(ConfigError::condition(&raw.kind, "one of 'exact' or 'series' is required")),
    }
}

/// `"2xx"`, `"2XX"` and `"2"` all resolve to `'2'`.
fn parse_series(series: &str) -> Option<char> {
    let mut chars = series.chars();
    let leading = chars.next().filter(|c| ('1'..='5').contains(c))?;
    chars.all(|c| c == 'x' || c == 'X').then_some(leading)
}

fn parse_size(raw: &RawCondition) -> Result<ConditionSpec, ConfigError> {
    let fields: SizeFields = raw.fields()?;

    match (fields.minimum, fields.maximum) {
        (None, None) => Err(ConfigError::condition(
            &raw.kind,
            "at least one of 'minimum' or 'maximum' is required",
        )),
        (Some(min), Some(max)) if max <= min.saturating_add(1) => Err(ConfigError::condition(
            &raw.kind,
            format!("no body size lies strictly between {min} and {max}"),
        )),
        (None, Some(0)) => {
            Err(ConfigError::condition(&raw.kind, "'maximum' of 0 can never be satisfied"))
        }
        (min, max) => Ok(ConditionSpec::ResponseSize { min, max }),
    }
}
