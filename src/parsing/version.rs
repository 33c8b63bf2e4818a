//! The mandatory `from` line declaring the minimum tool version.

use crate::language::{Natural, Version};
use crate::parsing::parser::SyntaxError;

/// Recognize
///
/// ```text
/// from v1.2.3
/// ```
///
/// where the leading `v` is optional and each component is a run of decimal
/// digits of any length. Returns Ok(None) if the line isn't a `from` line at
/// all, and an error if it is one but is malformed.
pub fn parse_version(line: &str) -> Result<Option<Version>, SyntaxError> {
    let re = regex!(r"^(\s*)from(?:\s+(.*?))?\s*$");

    let cap = match re.captures(line) {
        Some(cap) => cap,
        None => return Ok(None),
    };

    if !cap[1].is_empty() {
        return Err(SyntaxError::VersionIndentation);
    }

    let number = cap
        .get(2)
        .map(|m| m.as_str())
        .unwrap_or("");

    let re = regex!(r"^v?([0-9]+)\.([0-9]+)\.([0-9]+)$");

    let cap = re
        .captures(number)
        .ok_or(SyntaxError::VersionFormat)?;

    let component = |i: usize| Natural::parse(&cap[i]).ok_or(SyntaxError::VersionFormat);

    Ok(Some(Version {
        major: component(1)?,
        minor: component(2)?,
        patch: component(3)?,
    }))
}
