//! Feature modules - each feature follows Hexagonal Architecture
//!
//! Each feature contains, where it needs them:
//! - domain/     - Pure models and rendering (no I/O)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations

// Go source → owned declaration model (tree-sitter)
pub mod parsing;

// Single-pass multiplexed traversal with pluggable consumers
pub mod compiler;

// Identifier casing and type-name inference
pub mod naming;

// Type-directed example and zero values
pub mod value_synth;

// Format, validate and write synthesized files
pub mod emit;

// Delegating proxies for layer packages, rewired entry packages
pub mod decorator;

// Builders and mocks under the generate root
pub mod test_helpers;
