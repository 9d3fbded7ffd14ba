//! Usecase Layer - the two top-level operations
//!
//! `decorate` writes delegating proxies and rewired entry packages under the
//! decorate root; `generate` writes builders and mocks under the generate
//! root. Both are a single compile with the matching consumers registered.

pub mod synthesis_service;

pub use synthesis_service::{
    decorate, generate, Operation, SynthesisRequest, SynthesisResult, SynthesisService,
};
