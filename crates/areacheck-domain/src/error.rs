//! Domain error types for the check pipeline.

use thiserror::Error;

/// Validation errors raised while turning raw request input into a point.
///
/// All variants are fail-fast and non-retryable: the first failing stage
/// aborts the pipeline and no later stage runs.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required parameter key is entirely absent from the request.
    #[error("parameter not found: {param}")]
    ParamNotFound { param: String },

    /// The parameter key is present but carries no value.
    #[error("no value provided for parameter: {param}")]
    ParamValueNotProvided { param: String },

    /// The value is present but fails length, parse, range, or
    /// scale-set-membership checks.
    #[error("invalid value for parameter {param}: {reason}")]
    InvalidValue { param: String, reason: String },
}

impl DomainError {
    /// Creates an invalid-value error for `param`.
    pub fn invalid_value(param: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            param: param.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter.
    pub fn param(&self) -> &str {
        match self {
            Self::ParamNotFound { param }
            | Self::ParamValueNotProvided { param }
            | Self::InvalidValue { param, .. } => param,
        }
    }
}

/// Result type for pipeline stages.
pub type DomainResult<T> = Result<T, DomainError>;
