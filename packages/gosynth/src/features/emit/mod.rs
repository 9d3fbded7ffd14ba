//! Emission Feature
//!
//! Turns synthesized text into a file on disk: import resolution, the
//! external printer, re-parse validation and the debug dump on failure.
//!
//! ## Structure
//! - `domain/` - CodeWriter, import resolution, file assembly
//! - `ports/` - Formatter trait
//! - `application/` - Emitter
//! - `infrastructure/` - goimports/gofmt child-process formatter, no-op formatter

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::Emitter;
pub use domain::{
    is_std_import, render_go_file, render_import_block, resolve_imports, CodeWriter,
};
pub use infrastructure::{formatter_for, CommandFormatter, NoopFormatter};
pub use ports::Formatter;
