//! Value Synthesizer
//!
//! Type-directed construction of example values as object-language source:
//! a few preparatory statements plus one value expression.

mod primitives;
mod synthesizer;

pub use primitives::{example_call, zero_literal};
pub use synthesizer::{LocalType, SynthMode, Synthesized, ValueSynthesizer};
