//! Traversal Engine
//!
//! Walks a module once, parses every package directory and fans structural
//! events out to registered consumers.
//!
//! ## Structure
//! - `domain/` - PackageInfo, FileInfo, TypeInfo, FuncInfo, options and summary
//! - `ports/` - Consumer trait
//! - `application/` - Compiler
//! - `infrastructure/` - module and package discovery

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::Compiler;
#[cfg(test)]
pub(crate) use application::visit_file;
pub use domain::{
    CompileOptions, CompileSummary, FileInfo, FuncInfo, ModulePackages, PackageInfo, TypeInfo,
};
pub use ports::Consumer;
