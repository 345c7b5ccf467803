//! Encoding-aware genetic algorithm engine.
//!
//! A research framework for studying how bit-level encodings of real
//! numbers affect the convergence of genetic search. The same
//! evolutionary loop runs over pluggable codeword layouts:
//!
//! - **Binary**: ascending count order — compact, but adjacent reals can
//!   differ in every bit at carry boundaries.
//! - **Gray**: reflected binary Gray code — adjacent interval points
//!   always differ in exactly one bit (high locality).
//! - **Custom**: arbitrary precomputed permutations, persisted per bit
//!   width, for pathological or optimized localities.
//!
//! # Architecture
//!
//! [`encoding`] holds the representation layer: discretized intervals,
//! codeword bitstrings, the bijective encoding table, persisted
//! permutation files, and locality analysis. [`ga`] holds the
//! encoding-agnostic search: chromosomes and their operators, selection
//! strategies, and the budget-terminated evolutionary loop. The objective
//! function under optimization and any statistics over the emitted run
//! logs are external collaborators.
//!
//! Runs are single-threaded and generation-synchronous; termination is a
//! hard cap on budget-charged fitness evaluations, never a generation
//! count.

pub mod encoding;
pub mod error;
pub mod ga;
