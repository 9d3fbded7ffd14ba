//! Traversal domain models

mod info;
mod summary;

pub use info::{FileInfo, FuncInfo, ModulePackages, PackageInfo, TypeInfo};
pub use summary::{CompileOptions, CompileSummary};
