//! Whole-file assembly

use crate::features::parsing::domain::ImportSpec;

use super::code_writer::CodeWriter;
use super::imports::render_import_block;

/// Package clause, import block and body, separated by blank lines
pub fn render_go_file(package: &str, imports: &[ImportSpec], body: &str) -> String {
    let mut out = CodeWriter::new();
    out.line(format!("package {}", package));
    if !imports.is_empty() {
        out.blank().raw(&render_import_block(imports));
    }
    if !body.trim().is_empty() {
        out.blank().raw(body);
    }
    out.finish()
}
