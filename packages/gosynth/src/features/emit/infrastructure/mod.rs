//! Emission infrastructure - external printers

mod command;

pub use command::{formatter_for, CommandFormatter, NoopFormatter};
