//! Naming Helper
//!
//! Identifier visibility and casing rules of the object language, plus
//! type-name inference for anonymous fields and parameters.

mod casing;
mod inference;

pub use casing::{convert_to_unexported, escape_keyword, is_exported};
pub use inference::{derived_alias, infer_name, parameter_names};
