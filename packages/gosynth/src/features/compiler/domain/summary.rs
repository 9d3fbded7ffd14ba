//! Options and outcome of one compile

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::config::SynthConfig;
use crate::shared::constants::output::EXCLUDED_DIRS;

/// Traversal options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Parse `_test.go` files but do not dispatch them
    pub skip_test_files: bool,
    /// Directory names pruned from the walk
    pub excluded_dirs: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            skip_test_files: true,
            excluded_dirs: EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl CompileOptions {
    pub fn from_config(config: &SynthConfig) -> Self {
        Self {
            skip_test_files: config.skip_test_files,
            excluded_dirs: config.walk_exclusions(),
        }
    }
}

/// What one compile did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileSummary {
    pub module: String,
    pub packages: usize,
    /// Files dispatched to at least one consumer
    pub files: usize,
    pub files_written: Vec<PathBuf>,
    #[serde(serialize_with = "serialize_millis")]
    pub parse_time: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}
