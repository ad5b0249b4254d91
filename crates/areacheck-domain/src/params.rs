//! Raw request parameter bag.

use std::collections::HashMap;

use crate::error::{DomainError, DomainResult};

/// Multi-valued parameter bag as handed over by the transport layer.
///
/// Duplicate keys accumulate their values in wire order; the pipeline only
/// ever reads the first value of a key.
pub type RawParams = HashMap<String, Vec<String>>;

/// Returns the first value associated with `name`.
///
/// An absent key fails with [`DomainError::ParamNotFound`]; a key that is
/// present but has no values, or whose first value is the empty string
/// (`key=` on the wire), fails with [`DomainError::ParamValueNotProvided`].
pub fn first_param<'a>(params: &'a RawParams, name: &str) -> DomainResult<&'a str> {
    let values = params.get(name).ok_or_else(|| DomainError::ParamNotFound {
        param: name.to_string(),
    })?;

    match values.first().map(String::as_str) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DomainError::ParamValueNotProvided {
            param: name.to_string(),
        }),
    }
}
