//! Emission domain

mod code_writer;
mod go_file;
mod imports;

pub use code_writer::CodeWriter;
pub use go_file::render_go_file;
pub use imports::{is_std_import, render_import_block, resolve_imports};
