use tracing::debug;

use super::types::{ConditionResult, ConditionSpec};
use crate::error::{ConditionError, ConfigError, ProbeError};
use crate::probe::ProbeResult;

/// Evaluate a single condition against a probe result.
///
/// Returns whether the condition passed together with a human readable
/// detail. Malformed specs and unknown condition types are errors; callers
/// turn those into failed conditions.
pub fn evaluate(
    spec: &ConditionSpec,
    result: &ProbeResult,
) -> Result<(bool, String), ConditionError> {
    match spec {
        ConditionSpec::StatusCodeExact { code } => Ok(exact(*code, result.status_code)),
        ConditionSpec::StatusCodeNotExact { code } => {
            let (matched, _) = exact(*code, result.status_code);
            let detail = if matched {
                format!("got excluded status {}", result.status_code)
            } else {
                format!("status {} differs from excluded {code}", result.status_code)
            };
            Ok((!matched, detail))
        }
        ConditionSpec::StatusCodeSeries { leading_digit } => {
            series(*leading_digit, result.status_code)
        }
        ConditionSpec::StatusCodeNotSeries { leading_digit } => {
            let (matched, _) = series(*leading_digit, result.status_code)?;
            let detail = if matched {
                format!("status {} is in excluded {leading_digit}xx series", result.status_code)
            } else {
                format!("status {} is outside {leading_digit}xx series", result.status_code)
            };
            Ok((!matched, detail))
        }
        ConditionSpec::ResponseSize { min, max } => size(*min, *max, result.size_bytes as u64),
        ConditionSpec::ContentMatch { terms } => Ok(content(terms, &result.body)),
        ConditionSpec::Unsupported { kind } => {
            Err(ConditionError::Unsupported { kind: kind.clone() })
        }
    }
}

/// Evaluate every condition in declaration order.
///
/// Evaluation errors fail only the condition that raised them.
pub fn evaluate_all(specs: &[ConditionSpec], result: &ProbeResult) -> Vec<ConditionResult> {
    specs
        .iter()
        .map(|spec| match evaluate(spec, result) {
            Ok((passed, detail)) => ConditionResult::new(spec.clone(), passed, detail),
            Err(error) => {
                debug!(condition = spec.kind(), %error, "condition could not be evaluated");
                ConditionResult::failed(spec.clone(), error.to_string())
            }
        })
        .collect()
}

/// Fail every condition because the probe itself failed.
pub fn fail_all(specs: &[ConditionSpec], error: &ProbeError) -> Vec<ConditionResult> {
    let detail = format!("probe failed: {error}");
    specs.iter().map(|spec| ConditionResult::failed(spec.clone(), detail.clone())).collect()
}

fn exact(expected: u16, actual: u16) -> (bool, String) {
    if actual == expected {
        (true, format!("status {actual}"))
    } else {
        (false, format!("expected status {expected}, got {actual}"))
    }
}

fn series(leading_digit: char, actual: u16) -> Result<(bool, String), ConditionError> {
    let text = actual.to_string();
    let first = match text.chars().next() {
        Some(first) if text.len() == 3 => first,
        _ => {
            return Err(ConditionError::Evaluation {
                reason: format!("status code {actual} is not a three-digit code"),
            });
        }
    };

    if first == leading_digit {
        Ok((true, format!("status {actual} is in {leading_digit}xx series")))
    } else {
        Ok((false, format!("expected {leading_digit}xx status, got {actual}")))
    }
}

fn size(min: Option<u64>, max: Option<u64>, len: u64) -> Result<(bool, String), ConditionError> {
    let (passed, range) = match (min, max) {
        (Some(min), Some(max)) => {
            (min < len && len < max, format!("exclusive range ({min}, {max})"))
        }
        (Some(min), None) => (len > min, format!("exclusive minimum {min}")),
        (None, Some(max)) => (len < max, format!("exclusive maximum {max}")),
        (None, None) => {
            return Err(ConfigError::condition(
                "responseSize",
                "at least one of 'minimum' or 'maximum' is required",
            )
            .into());
        }
    };

    let verdict = if passed { "within" } else { "outside" };
    Ok((passed, format!("body size {len} bytes {verdict} {range}")))
}

fn content(terms: &[String], body: &str) -> (bool, String) {
    let missing: Vec<&str> =
        terms.iter().map(String::as_str).filter(|term| !body.contains(term)).collect();

    if missing.is_empty() {
        (true, format!("all {} terms found", terms.len()))
    } else {
        (false, format!("missing terms: {}", missing.join(", ")))
    }
}
