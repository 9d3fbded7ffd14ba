/*
 * gosynth - Go source synthesis engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, LineIndex, NameScope) and constants
 * - features/    : Vertical slices (parsing → compiler → decorator / test_helpers)
 * - config/      : gosynth.yaml schema and validation
 * - usecases/    : decorate and generate
 *
 * One walk per operation: every package is parsed once and its
 * declarations are fanned out to all registered consumers.
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Renderers thread writer, alias and scope
#![allow(clippy::new_without_default)] // Observers borrow config and emitter
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

/// Usecase layer (decorate, generate)
pub mod usecases;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::SynthConfig;
pub use errors::{Result, SynthError};
pub use features::compiler::{CompileOptions, CompileSummary, Compiler, Consumer};
pub use usecases::{decorate, generate, Operation, SynthesisRequest, SynthesisResult, SynthesisService};
