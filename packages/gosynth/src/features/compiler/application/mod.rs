//! Traversal application layer

mod compiler;

pub use compiler::Compiler;
#[cfg(test)]
pub(crate) use compiler::visit_file;
