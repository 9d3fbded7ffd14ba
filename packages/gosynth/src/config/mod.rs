//! Configuration System
//!
//! One YAML document, `gosynth.yaml` at the project root, overrides the
//! defaults in `shared::constants`. Every field is optional.
//!
//! # Examples
//!
//! ```rust,ignore
//! use gosynth::config::SynthConfig;
//!
//! // Defaults, or <root>/gosynth.yaml when present
//! let config = SynthConfig::load(root)?;
//!
//! // Explicit file
//! let config = SynthConfig::from_yaml_file("ci/gosynth.yaml")?;
//! ```
//!
//! # Schema (v1)
//!
//! ```yaml
//! version: 1
//! decorate_dir: build
//! generate_dir: gen
//! layer_names: [handler, controller, gateway, repository]
//! formatter: goimports
//! example_cardinality: 2
//! example_factory:
//!   import_path: github.com/brianvoe/gofakeit/v6
//!   package: gofakeit
//! ```

pub mod error;
pub mod synth_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use synth_config::{ExampleFactory, FormatterKind, SynthConfig, CONFIG_VERSION};
pub use validation::Validatable;
