//! Traversal ports

mod consumer;

pub use consumer::Consumer;
