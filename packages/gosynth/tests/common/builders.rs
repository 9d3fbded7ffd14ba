//! Scratch Go modules

use std::fs;
use std::path::{Path, PathBuf};

use gosynth::config::{FormatterKind, SynthConfig};
use tempfile::TempDir;

/// Writes a Go module into a fresh temporary directory
pub struct ModuleBuilder {
    module: String,
    files: Vec<(PathBuf, String)>,
}

impl ModuleBuilder {
    pub fn new(module: &str) -> Self {
        Self {
            module: module.to_string(),
            files: Vec::new(),
        }
    }

    /// Add `source` at `rel` (slash-separated, relative to the module root)
    pub fn file(mut self, rel: &str, source: &str) -> Self {
        self.files.push((PathBuf::from(rel), source.to_string()));
        self
    }

    pub fn build(self) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("go.mod"),
            format!("module {}\n\ngo 1.21\n", self.module),
        )
        .unwrap();
        for (rel, source) in &self.files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, source).unwrap();
        }
        dir
    }
}

/// Defaults, without an external formatter
pub fn test_config() -> SynthConfig {
    SynthConfig::default().with_formatter(FormatterKind::None)
}

/// Every regular file below `dir`, relative and sorted, with its contents
pub fn snapshot(dir: &Path) -> Vec<(PathBuf, String)> {
    let mut files: Vec<(PathBuf, String)> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(dir).unwrap().to_path_buf();
            (rel, fs::read_to_string(e.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}
