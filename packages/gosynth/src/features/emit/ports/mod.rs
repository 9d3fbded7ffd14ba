//! Emission ports

mod formatter;

pub use formatter::Formatter;
