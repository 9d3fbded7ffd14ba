//! Synthesis configuration (YAML schema v1)

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::validation::{validate_dir_name, validate_non_empty, Validatable};
use crate::shared::constants::{classification, output, synthesis};

/// Only supported schema version
pub const CONFIG_VERSION: u32 = 1;

/// External printer every emitted file goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// `goimports`: gofmt plus import fix-up
    #[default]
    Goimports,
    Gofmt,
    /// Keep the synthesized text as written
    None,
}

impl FormatterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatterKind::Goimports => "goimports",
            FormatterKind::Gofmt => "gofmt",
            FormatterKind::None => "none",
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatterKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "goimports" => Ok(FormatterKind::Goimports),
            "gofmt" => Ok(FormatterKind::Gofmt),
            "none" | "off" => Ok(FormatterKind::None),
            _ => Err(ConfigError::UnknownFormatter(s.to_string())),
        }
    }
}

/// Package providing realistic example values to builders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExampleFactory {
    pub import_path: String,
    /// Identifier the package is referenced by
    pub package: String,
}

impl Default for ExampleFactory {
    fn default() -> Self {
        Self {
            import_path: synthesis::FACTORY_IMPORT_PATH.to_string(),
            package: synthesis::FACTORY_PACKAGE.to_string(),
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SynthConfig {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Output root for decorated packages
    pub decorate_dir: String,

    /// Output root for test helpers
    pub generate_dir: String,

    /// Import-path segments marking a decoratable layer
    pub layer_names: Vec<String>,

    /// Directory names never walked, on top of both output roots
    pub excluded_dirs: Vec<String>,

    pub formatter: FormatterKind,

    /// Elements per synthesized collection
    pub example_cardinality: usize,

    pub example_factory: ExampleFactory,

    /// Debug dump target, relative to the project root
    pub debug_log: String,

    /// Do not dispatch `_test.go` files to consumers; when dispatched, only
    /// the entry observer rewrites them
    pub skip_test_files: bool,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            decorate_dir: output::DECORATE_DIR.to_string(),
            generate_dir: output::GENERATE_DIR.to_string(),
            layer_names: to_strings(classification::LAYER_NAMES),
            excluded_dirs: to_strings(output::EXCLUDED_DIRS),
            formatter: FormatterKind::default(),
            example_cardinality: synthesis::EXAMPLE_CARDINALITY,
            example_factory: ExampleFactory::default(),
            debug_log: output::DEBUG_LOG.to_string(),
            skip_test_files: true,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl SynthConfig {
    /// Load `<root>/gosynth.yaml` when present, defaults otherwise
    pub fn load(root: &Path) -> ConfigResult<Self> {
        let path = root.join(output::CONFIG_FILE);
        if path.is_file() {
            debug!(path = %path.display(), "Loading configuration");
            Self::from_yaml_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate an explicit YAML file
    pub fn from_yaml_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: SynthConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Every directory name the walker prunes
    pub fn walk_exclusions(&self) -> Vec<String> {
        let mut names = self.excluded_dirs.clone();
        for dir in [&self.decorate_dir, &self.generate_dir] {
            if !names.contains(dir) {
                names.push(dir.clone());
            }
        }
        names
    }

    pub fn with_formatter(mut self, formatter: FormatterKind) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_skip_test_files(mut self, skip: bool) -> Self {
        self.skip_test_files = skip;
        self
    }
}

impl Validatable for SynthConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: vec![CONFIG_VERSION],
            });
        }
        validate_dir_name("decorate_dir", &self.decorate_dir)?;
        validate_dir_name("generate_dir", &self.generate_dir)?;
        validate_non_empty("layer_names", &self.layer_names)?;

        if self.example_cardinality == 0
            || self.example_cardinality > synthesis::MAX_EXAMPLE_CARDINALITY
        {
            return Err(ConfigError::range_with_hint(
                "example_cardinality",
                self.example_cardinality,
                1,
                synthesis::MAX_EXAMPLE_CARDINALITY,
                "Collections need at least one example element",
            ));
        }
        if self.example_factory.import_path.is_empty() {
            return Err(ConfigError::Empty("example_factory.import_path".into()));
        }
        if self.example_factory.package.is_empty() {
            return Err(ConfigError::Empty("example_factory.package".into()));
        }
        if self.debug_log.is_empty() {
            return Err(ConfigError::Empty("debug_log".into()));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "SynthConfig"
    }
}
