//! Formatter port (interface)
//!
//! The language-standard printer every emitted file passes through.

use std::path::Path;

use crate::errors::Result;

/// Canonical printer / import resolver
pub trait Formatter: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Format `source`, which will be written to `path`
    fn format(&self, source: &str, path: &Path) -> Result<String>;
}
