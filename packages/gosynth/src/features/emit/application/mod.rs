//! Emission application layer

mod emitter;

pub use emitter::Emitter;
