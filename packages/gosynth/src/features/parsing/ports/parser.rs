//! Parser port (interface)
//!
//! Defines the contract for parsing source code.

use std::path::Path;

use crate::errors::Result;
use crate::features::parsing::domain::GoFile;

/// Parser trait - abstraction over parsing implementation
pub trait Parser: Send + Sync {
    /// Parse source code into an owned object program
    fn parse(&self, source: &str, path: &Path) -> Result<GoFile>;

    /// Check that source is syntactically valid without lowering it
    fn validate(&self, source: &str, path: &Path) -> Result<()>;

    /// Check if this parser supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
