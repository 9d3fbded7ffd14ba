//! Parsing Feature
//!
//! Lowers Go source into the owned object-program model.
//!
//! ## Structure
//! - `domain/` - GoFile, declarations, type expressions
//! - `ports/` - Parser trait
//! - `application/` - ParseFileUseCase
//! - `infrastructure/` - GoParser (tree-sitter-go)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::ParseFileUseCase;
pub use domain::{Decl, GoFile, Signature, TypeDecl, TypeExpr, TypeShape};

// Re-export infrastructure (internal use - prefer application layer)
#[doc(hidden)]
pub use infrastructure::GoParser;
pub use ports::Parser;
