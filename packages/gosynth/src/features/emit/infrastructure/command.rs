//! Child-process formatters (`goimports`, `gofmt`)

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::config::FormatterKind;
use crate::errors::{Result, SynthError};
use crate::features::emit::ports::Formatter;

/// Runs a printer reading source on stdin and writing it on stdout
#[derive(Debug)]
pub struct CommandFormatter {
    program: &'static str,
    /// Set once the program turned out to be missing
    missing: AtomicBool,
}

impl CommandFormatter {
    pub fn new(program: &'static str) -> Self {
        Self {
            program,
            missing: AtomicBool::new(false),
        }
    }

    pub fn goimports() -> Self {
        Self::new("goimports")
    }

    pub fn gofmt() -> Self {
        Self::new("gofmt")
    }

    fn run(&self, source: &str, path: &Path) -> std::io::Result<std::process::Output> {
        let mut child = Command::new(self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes())?;
        }
        let output = child.wait_with_output()?;
        if !output.status.success() {
            tracing::debug!(program = self.program, path = %path.display(), "Formatter exited with failure");
        }
        Ok(output)
    }
}

impl Formatter for CommandFormatter {
    fn name(&self) -> &'static str {
        self.program
    }

    fn format(&self, source: &str, path: &Path) -> Result<String> {
        if self.missing.load(Ordering::Relaxed) {
            return Ok(source.to_string());
        }

        let output = match self.run(source, path) {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if !self.missing.swap(true, Ordering::Relaxed) {
                    warn!(
                        program = self.program,
                        "Formatter not found on PATH, writing unformatted output"
                    );
                }
                return Ok(source.to_string());
            }
            Err(e) => return Err(SynthError::io(path, e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SynthError::emit(
                path,
                format!("{} failed: {}", self.program, stderr.trim()),
            ));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| SynthError::emit(path, format!("{} produced invalid UTF-8: {}", self.program, e)))
    }
}

/// Leaves synthesized text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn name(&self) -> &'static str {
        "none"
    }

    fn format(&self, source: &str, _path: &Path) -> Result<String> {
        Ok(source.to_string())
    }
}

pub fn formatter_for(kind: FormatterKind) -> Box<dyn Formatter> {
    match kind {
        FormatterKind::Goimports => Box::new(CommandFormatter::goimports()),
        FormatterKind::Gofmt => Box::new(CommandFormatter::gofmt()),
        FormatterKind::None => Box::new(NoopFormatter),
    }
}
