//! Encoding-agnostic genetic algorithm.
//!
//! The evolutionary core never touches bits directly: chromosomes decode
//! through the experiment's [`EncodingTable`](crate::encoding::EncodingTable),
//! so the same loop runs unchanged over binary, Gray, or any custom
//! permutation layout. Users supply an [`ObjectiveFunction`] and a
//! [`GaConfig`]; the [`GaRunner`] produces a [`GaResult`] whose ordered
//! evaluation log is the unit of comparison across encodings.
//!
//! # Key Types
//!
//! - [`Chromosome`]: concatenated codewords with value-type equality
//! - [`Mode`]: optimization direction carrying all fitness comparisons
//! - [`GaConfig`] / [`Scheme`]: run parameters and codeword layout
//! - [`GaRunner`] / [`GaResult`]: the loop and its outcome
//! - [`selection`]: roulette-wheel and tournament parent selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Grefenstette (1986), "Optimization of Control Parameters for Genetic
//!   Algorithms"
//! - Caruana & Schaffer (1988), "Representation and Hidden Bias: Gray vs.
//!   Binary Coding for Genetic Algorithms"

mod chromosome;
mod config;
mod mode;
mod objective;
mod runner;
pub mod selection;

pub use chromosome::{Chromosome, FitnessMap};
pub use config::{GaConfig, Scheme};
pub use mode::Mode;
pub use objective::ObjectiveFunction;
pub use runner::{GaResult, GaRunner};
pub use selection::{tournament_selection, wheel_selection};
