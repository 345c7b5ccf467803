//! Bit-level encodings of discretized real intervals.
//!
//! Everything the GA layer knows about genotypes starts here: a
//! [`BitString`] is a codeword, an [`Interval`] is a discretized search
//! grid, and an [`EncodingTable`] is the bijection between the two that a
//! whole experiment shares. Precomputed permutations load through
//! [`PermutationStore`]; the [`locality`] submodule scores how rugged a
//! landscape becomes under a given table.
//!
//! # Key Types
//!
//! - [`BitString`]: fixed-width codeword value type
//! - [`Interval`]: `(start, end, step)` grid with power-of-two sizing
//! - [`EncodingTable`]: total bijection codeword ↔ grid point
//! - [`PermutationStore`]: persisted permutation files per bit width

mod bitstring;
mod interval;
pub mod locality;
mod persist;
mod table;

pub use bitstring::BitString;
pub use interval::Interval;
pub use persist::{PermutationStore, SUPPORTED_WIDTHS};
pub use table::EncodingTable;
