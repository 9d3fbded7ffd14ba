//! Exported/unexported identifier casing

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, SynthError};
use crate::shared::constants::go::KEYWORDS;

/// Already unexported: leading lower-case letter or underscore
static UNEXPORTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][A-Za-z0-9_]*$").expect("valid regex"));

/// `ID`, `URL`, `HTTP_PORT`
static ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("valid regex"));

/// `Request`, `UserID`
static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z])([a-z0-9][A-Za-z0-9_]*)$").expect("valid regex"));

/// `HTTPRequest`: the acronym run stops before the last capital of the run
static ACRONYM_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][A-Z0-9]*)([A-Z][a-z][A-Za-z0-9_]*)$").expect("valid regex")
});

/// First character is upper-case
pub fn is_exported(name: &str) -> bool {
    name.chars().next().map(char::is_uppercase).unwrap_or(false)
}

/// Lower-case the leading run of an identifier
///
/// Patterns are tried in order; a shape none of them covers is a
/// programming error rather than bad input.
pub fn convert_to_unexported(name: &str) -> Result<String> {
    if UNEXPORTED.is_match(name) {
        return Ok(name.to_string());
    }
    if ACRONYM.is_match(name) {
        return Ok(name.to_ascii_lowercase());
    }
    if let Some(caps) = TITLE.captures(name) {
        return Ok(format!("{}{}", caps[1].to_ascii_lowercase(), &caps[2]));
    }
    if let Some(caps) = ACRONYM_TITLE.captures(name) {
        return Ok(format!("{}{}", caps[1].to_ascii_lowercase(), &caps[2]));
    }
    Err(SynthError::UnrecognizedIdentifier(name.to_string()))
}

/// Append `_` to reserved words so they can be used as identifiers
pub fn escape_keyword(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}
