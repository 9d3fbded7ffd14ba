//! Configuration validation

use super::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Output directories are plain names: no separators, no `.`/`..`
pub fn validate_dir_name(field: &str, value: &str) -> ConfigResult<()> {
    if value.is_empty() {
        return Err(ConfigError::Empty(field.to_string()));
    }
    let bad = value.contains('/') || value.contains('\\') || value == "." || value == "..";
    if bad {
        return Err(ConfigError::InvalidDirName {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Reject an empty list, or one holding an empty entry
pub fn validate_non_empty(field: &str, values: &[String]) -> ConfigResult<()> {
    if values.is_empty() || values.iter().any(|v| v.trim().is_empty()) {
        return Err(ConfigError::Empty(field.to_string()));
    }
    Ok(())
}
