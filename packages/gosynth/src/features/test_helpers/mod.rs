//! Test-Helper Synthesizer
//!
//! Fluent builders for exported structs and expectation-based mocks for
//! exported interfaces, written under the generate output root. Both
//! observers skip the entry package, test files, unexported types and
//! generic types.

mod builder;
mod mocker;
mod support;

pub use builder::{render_builder, BuilderObserver};
pub use mocker::{render_mocker, MockerObserver};
pub use support::{exported_fields, factory_import, local_types};
