//! Emitter: format, validate, write
//!
//! Output that fails formatting or re-parsing is appended to the debug log
//! and never written to its target.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::SynthConfig;
use crate::errors::{Result, SynthError};
use crate::features::emit::infrastructure::formatter_for;
use crate::features::emit::ports::Formatter;
use crate::features::parsing::{GoParser, Parser};

/// Writes synthesized files
pub struct Emitter {
    formatter: Box<dyn Formatter>,
    parser: GoParser,
    debug_log: PathBuf,
}

impl Emitter {
    pub fn new(formatter: Box<dyn Formatter>, debug_log: impl Into<PathBuf>) -> Self {
        Self {
            formatter,
            parser: GoParser::new(),
            debug_log: debug_log.into(),
        }
    }

    pub fn from_config(config: &SynthConfig, root: &Path) -> Self {
        Self::new(formatter_for(config.formatter), root.join(&config.debug_log))
    }

    pub fn debug_log(&self) -> &Path {
        &self.debug_log
    }

    /// Format and validate `source`, then write it to `target`
    pub fn emit(&self, target: &Path, source: &str) -> Result<PathBuf> {
        let formatted = match self.formatter.format(source, target) {
            Ok(formatted) => formatted,
            Err(e) => {
                self.dump(target, &e.to_string(), source);
                return Err(e);
            }
        };

        if let Err(e) = self.parser.validate(&formatted, target) {
            self.dump(target, &e.to_string(), &formatted);
            return Err(SynthError::emit(
                target,
                format!("synthesized output does not parse: {}", e),
            ));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| SynthError::io(parent, e))?;
        }
        fs::write(target, formatted.as_bytes()).map_err(|e| SynthError::io(target, e))?;
        debug!(
            path = %target.display(),
            formatter = self.formatter.name(),
            bytes = formatted.len(),
            "Emitted"
        );
        Ok(target.to_path_buf())
    }

    /// Best-effort dump of rejected output
    fn dump(&self, target: &Path, reason: &str, source: &str) {
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.debug_log)
            .and_then(|mut log| {
                writeln!(log, "// ==== {}", target.display())?;
                writeln!(log, "// {}", reason.replace('\n', " "))?;
                log.write_all(source.as_bytes())?;
                writeln!(log)
            });
        match written {
            Ok(()) => warn!(
                path = %target.display(),
                log = %self.debug_log.display(),
                "Rejected output dumped"
            ),
            Err(e) => warn!(log = %self.debug_log.display(), error = %e, "Could not write debug log"),
        }
    }
}
