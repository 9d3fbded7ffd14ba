//! Error types for gosynth
//!
//! Provides unified error handling across the crate.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for gosynth operations
#[derive(Debug, Error)]
pub enum SynthError {
    /// IO error, always tied to the path being read or written
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk error
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Malformed object-language source
    #[error("Parse error in {}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u32,
        column: u32,
        message: String,
    },

    /// Formatter or import-resolution failure on synthesized output
    #[error("Emit error for {}: {message}", path.display())]
    Emit { path: PathBuf, message: String },

    /// A type shape the value synthesizer has no rule for
    #[error("Unsupported type kind: {0}")]
    UnsupportedType(String),

    /// An identifier shape the casing rules have no pattern for
    #[error("Unrecognized identifier shape: {0:?}")]
    UnrecognizedIdentifier(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SynthError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SynthError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(path: impl AsRef<Path>, line: u32, column: u32, message: impl Into<String>) -> Self {
        SynthError::Parse {
            path: path.as_ref().to_path_buf(),
            line,
            column,
            message: message.into(),
        }
    }

    pub fn emit(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        SynthError::Emit {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        SynthError::UnsupportedType(kind.into())
    }

    /// Synthesizer coverage gaps, as opposed to bad user input
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            SynthError::UnsupportedType(_) | SynthError::UnrecognizedIdentifier(_)
        )
    }
}

/// Result type alias for gosynth operations
pub type Result<T> = std::result::Result<T, SynthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SynthError::parse("internal/lookup/service.go", 12, 4, "unexpected token");

        let msg = format!("{}", err);
        assert!(msg.contains("internal/lookup/service.go:12:4"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = SynthError::io(
            "build/main.go",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(format!("{}", err).contains("build/main.go"));
        assert!(!err.is_programming_error());
    }

    #[test]
    fn test_programming_errors() {
        assert!(SynthError::unsupported("func()").is_programming_error());
        assert!(SynthError::UnrecognizedIdentifier("_".into()).is_programming_error());
    }
}
