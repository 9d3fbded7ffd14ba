//! Common test utilities for gosynth
//!
//! Go module fixtures written into scratch directories, plus assertions
//! over the synthesized output.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
