use regex::Regex;
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Returns the first capture group of the first match of `pattern` in
/// `input`.
///
/// A match whose first group did not participate yields an empty string.
pub fn match_group1(pattern: &str, input: &str) -> Result<String, Error> {
    let regex = Regex::new(pattern).map_err(|err| {
        Error::new(
            ErrorImpl::InvalidPattern {
                pattern: pattern.to_string(),
                message: err.to_string(),
            },
            Position(0),
        )
    })?;

    let Some(captures) = regex.captures(input) else {
        return Err(Error::new(
            ErrorImpl::PatternNotMatched {
                pattern: pattern.to_string(),
            },
            Position(0),
        ));
    };

    let group = captures.get(1);
    if let Some(group) = group {
        debug!(pattern, offset = group.start(), "pattern matched");
    }
    Ok(group.map_or_else(String::new, |group| group.as_str().to_string()))
}

/// Tries `patterns` in order and returns the first group of the first one
/// that matches `source`.
///
/// When none matches, the error of the first pattern is returned.
pub fn find_function_name(source: &str, patterns: &[&str]) -> Result<String, Error> {
    let mut first_error = None;

    for pattern in patterns {
        match match_group1(pattern, source) {
            Ok(name) => return Ok(name),
            Err(err) => {
                debug!(pattern, error = %err, "pattern failed");
                first_error.get_or_insert(err);
            }
        }
    }

    Err(first_error.unwrap_or_else(|| {
        Error::new(
            ErrorImpl::PatternNotMatched {
                pattern: String::new(),
            },
            Position(0),
        )
    }))
}
