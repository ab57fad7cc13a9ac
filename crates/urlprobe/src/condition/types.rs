use std::fmt;

/// A declarative assertion about a probe result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionSpec {
    /// Status code equals `code`.
    StatusCodeExact { code: u16 },
    /// First digit of the status code equals `leading_digit`.
    StatusCodeSeries { leading_digit: char },
    /// Status code differs from `code`.
    StatusCodeNotExact { code: u16 },
    /// First digit of the status code differs from `leading_digit`.
    StatusCodeNotSeries { leading_digit: char },
    /// Body length in bytes lies strictly between the present bounds.
    ResponseSize { min: Option<u64>, max: Option<u64> },
    /// Every term occurs in the body (case-sensitive).
    ContentMatch { terms: Vec<String> },
    /// A condition type this agent does not know how to evaluate.
    Unsupported { kind: String },
}

impl ConditionSpec {
    /// Wire name of the condition type.
    pub fn kind(&self) -> &str {
        match self {
            Self::StatusCodeExact { .. } | Self::StatusCodeSeries { .. } => "responseCode",
            Self::StatusCodeNotExact { .. } | Self::StatusCodeNotSeries { .. } => "notResponseCode",
            Self::ResponseSize { .. } => "responseSize",
            Self::ContentMatch { .. } => "contentMatch",
            Self::Unsupported { kind } => kind,
        }
    }
}

impl fmt::Display for ConditionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusCodeExact { code } => write!(f, "status == {code}"),
            Self::StatusCodeSeries { leading_digit } => write!(f, "status is {leading_digit}xx"),
            Self::StatusCodeNotExact { code } => write!(f, "status != {code}"),
            Self::StatusCodeNotSeries { leading_digit } => {
                write!(f, "status is not {leading_digit}xx")
            }
            Self::ResponseSize { min: Some(min), max: Some(max) } => {
                write!(f, "{min} < size < {max}")
            }
            Self::ResponseSize { min: Some(min), max: None } => write!(f, "size > {min}"),
            Self::ResponseSize { min: None, max: Some(max) } => write!(f, "size < {max}"),
            Self::ResponseSize { min: None, max: None } => write!(f, "size (unbounded)"),
            Self::ContentMatch { terms } => write!(f, "body contains {terms:?}"),
            Self::Unsupported { kind } => write!(f, "unsupported '{kind}'"),
        }
    }
}

/// Result of evaluating one condition during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionResult {
    pub spec: ConditionSpec,
    pub passed: bool,
    pub detail: String,
}

impl ConditionResult {
    pub fn new(spec: ConditionSpec, passed: bool, detail: impl Into<String>) -> Self {
        Self { spec, passed, detail: detail.into() }
    }

    pub fn failed(spec: ConditionSpec, detail: impl Into<String>) -> Self {
        Self::new(spec, false, detail)
    }
}
