//! Synthesis Service - runs one compile per operation
//!
//! ```rust,ignore
//! use gosynth::config::SynthConfig;
//! use gosynth::usecases::{Operation, SynthesisRequest, SynthesisService};
//!
//! let service = SynthesisService::new(SynthConfig::load(&root)?);
//! let result = service.run(&SynthesisRequest::new(Operation::Generate, root))?;
//! println!("{} files written", result.summary.files_written.len());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use crate::config::{SynthConfig, Validatable};
use crate::errors::{Result, SynthError};
use crate::features::compiler::{CompileOptions, CompileSummary, Compiler};
use crate::features::decorator::{EntryObserver, LayerObserver};
use crate::features::emit::Emitter;
use crate::features::test_helpers::{BuilderObserver, MockerObserver};

/// Top-level operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Decorate,
    Generate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Decorate => write!(f, "decorate"),
            Operation::Generate => write!(f, "generate"),
        }
    }
}

/// What to run, and where
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub operation: Operation,
    /// Module root (the directory holding `go.mod`)
    pub root: PathBuf,
}

impl SynthesisRequest {
    pub fn new(operation: Operation, root: impl Into<PathBuf>) -> Self {
        Self {
            operation,
            root: root.into(),
        }
    }
}

/// Outcome of one operation
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisResult {
    pub operation: Operation,
    pub summary: CompileSummary,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Entry point for both operations
pub struct SynthesisService {
    config: SynthConfig,
}

impl SynthesisService {
    pub fn new(config: SynthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn run(&self, request: &SynthesisRequest) -> Result<SynthesisResult> {
        self.config.validate()?;
        if !request.root.is_dir() {
            return Err(SynthError::io(
                &request.root,
                std::io::Error::new(std::io::ErrorKind::NotFound, "module root is not a directory"),
            ));
        }

        let start = Instant::now();
        let emitter = Emitter::from_config(&self.config, &request.root);
        let options = CompileOptions::from_config(&self.config);
        info!(
            operation = %request.operation,
            root = %request.root.display(),
            formatter = %self.config.formatter,
            "Starting"
        );

        let summary = match request.operation {
            Operation::Decorate => Compiler::new()
                .with_consumer(EntryObserver::new(&self.config, &emitter))
                .with_consumer(LayerObserver::new(&self.config, &emitter))
                .compile(&request.root, &options)?,
            Operation::Generate => Compiler::new()
                .with_consumer(BuilderObserver::new(&self.config, &emitter))
                .with_consumer(MockerObserver::new(&self.config, &emitter))
                .compile(&request.root, &options)?,
        };

        let duration = start.elapsed();
        info!(
            operation = %request.operation,
            written = summary.files_written.len(),
            elapsed_ms = duration.as_millis() as u64,
            "Done"
        );
        Ok(SynthesisResult {
            operation: request.operation,
            summary,
            duration,
        })
    }
}

/// Decorate the module at `root`
pub fn decorate(root: &Path, config: &SynthConfig) -> Result<CompileSummary> {
    SynthesisService::new(config.clone())
        .run(&SynthesisRequest::new(Operation::Decorate, root))
        .map(|result| result.summary)
}

/// Generate test helpers for the module at `root`
pub fn generate(root: &Path, config: &SynthConfig) -> Result<CompileSummary> {
    SynthesisService::new(config.clone())
        .run(&SynthesisRequest::new(Operation::Generate, root))
        .map(|result| result.summary)
}
