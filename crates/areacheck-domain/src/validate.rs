//! Numeric string validation.

use crate::error::{DomainError, DomainResult};

/// Longest numeric string accepted on the wire, in bytes.
///
/// Enforced before any parse is attempted so pathological input size is
/// bounded independently of the parser's own limits.
pub const MAX_NUMERIC_LEN: usize = 10;

/// Parses `raw` as a finite decimal number.
///
/// Rejects empty strings and strings longer than [`MAX_NUMERIC_LEN`] before
/// parsing. `f64` parsing itself accepts `NaN` and `inf` spellings; those
/// are rejected afterwards since the wire contract only admits finite
/// decimals.
pub fn parse_decimal(param: &str, raw: &str) -> DomainResult<f64> {
    if raw.is_empty() {
        return Err(DomainError::invalid_value(
            param,
            "empty string provided, expected a non-empty decimal",
        ));
    }
    if raw.len() > MAX_NUMERIC_LEN {
        return Err(DomainError::invalid_value(
            param,
            format!("max allowed length is {MAX_NUMERIC_LEN}, got {}", raw.len()),
        ));
    }

    let value: f64 = raw
        .parse()
        .map_err(|_| DomainError::invalid_value(param, format!("not a decimal number: {raw}")))?;

    if !value.is_finite() {
        return Err(DomainError::invalid_value(
            param,
            format!("not a finite number: {raw}"),
        ));
    }

    Ok(value)
}

/// Checks `lower <= value <= upper`, both bounds inclusive.
pub fn check_range(param: &str, lower: f64, value: f64, upper: f64) -> DomainResult<()> {
    if !(lower <= value && value <= upper) {
        return Err(DomainError::invalid_value(
            param,
            format!("value not within range [{lower}, {upper}]: got {value}"),
        ));
    }
    Ok(())
}
