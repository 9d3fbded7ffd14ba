//! Parse file use case

use std::fs;
use std::path::Path;

use crate::errors::{Result, SynthError};
use crate::features::parsing::domain::GoFile;
use crate::features::parsing::ports::Parser;

/// Parse file use case
pub struct ParseFileUseCase<P: Parser> {
    parser: P,
}

impl<P: Parser> ParseFileUseCase<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Parse source already in memory
    pub fn execute(&self, source: &str, path: &Path) -> Result<GoFile> {
        self.parser.parse(source, path)
    }

    /// Read and parse one file from disk
    pub fn execute_path(&self, path: &Path) -> Result<GoFile> {
        let source = fs::read_to_string(path).map_err(|e| SynthError::io(path, e))?;
        self.execute(&source, path)
    }
}
