//! Error types for the encoding and GA layers.
//!
//! All variants are precondition failures surfaced immediately to the
//! caller. Genetic operators are pure given their random draws, so there
//! are no retry semantics anywhere in the crate.

use thiserror::Error;

/// Errors from encoding-table construction, lookup, and loading.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The interval bounds and step do not describe a discretized range.
    #[error("invalid interval: start={start}, end={end}, step={step}")]
    InvalidInterval { start: f64, end: f64, step: f64 },

    /// The codeword list cannot cover the interval bijectively.
    #[error("encoding size mismatch: {codewords} codewords for {points} interval points")]
    SizeMismatch { codewords: usize, points: usize },

    /// A codeword's width differs from the table's bit width.
    #[error("codeword width mismatch: expected {expected} bits, got {actual}")]
    CodewordWidth { expected: usize, actual: usize },

    /// The same codeword appears twice in the supplied list.
    #[error("duplicate codeword: {0}")]
    DuplicateCodeword(String),

    /// Decode was asked for a bitstring outside the table.
    #[error("unknown codeword: {0}")]
    UnknownCodeword(String),

    /// Encode was asked for a real number not on the interval grid.
    #[error("value {0} is not a point of the discretized interval")]
    UnknownValue(f64),

    /// No precomputed permutation exists for the requested bit width.
    #[error("no precomputed permutation for width {width} (supported: {supported:?})")]
    UnsupportedWidth {
        width: usize,
        supported: &'static [usize],
    },

    /// A persisted permutation file contains a line that is not a codeword.
    #[error("malformed codeword at line {line}: {text:?}")]
    MalformedCodeword { line: usize, text: String },

    /// I/O failure while reading a persisted permutation file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the evolutionary core.
#[derive(Debug, Error)]
pub enum GaError {
    /// A decoded vector's length differs from the objective's declared
    /// input dimension.
    #[error("dimension mismatch: objective expects {expected} inputs, chromosome decodes to {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Tournament size outside `1..=population`.
    #[error("invalid tournament size {k} for population of {population}")]
    InvalidTournamentSize { k: usize, population: usize },

    /// Population size or chromosome length drifted from the configured
    /// invariants mid-run.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid run configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Encoding-table failure during setup.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
}
