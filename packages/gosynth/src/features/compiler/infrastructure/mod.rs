//! Traversal infrastructure - file system discovery

mod discovery;

pub use discovery::{discover_packages, module_name, parse_module_directive, PackageDir};
