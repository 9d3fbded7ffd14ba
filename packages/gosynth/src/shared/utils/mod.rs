//! Utility modules shared across features
//!
//! - `name_scope`: identifier allocation inside one generated scope
//! - `tree_sitter`: Tree-sitter AST traversal and extraction

pub mod name_scope;
pub mod tree_sitter;
