//! Chromosomes and their genetic operators.
//!
//! A chromosome concatenates one codeword per input dimension and shares
//! the experiment's [`EncodingTable`]. It is a value type: operators always
//! return new instances, and equality/hashing cover only the bitstring
//! content so chromosomes can key the per-generation fitness map.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rand::Rng;

use crate::encoding::{BitString, EncodingTable};
use crate::error::{EncodingError, GaError};

use super::mode::Mode;
use super::objective::ObjectiveFunction;

/// Raw fitness per chromosome, rebuilt from scratch every generation.
pub type FitnessMap = HashMap<Chromosome, f64>;

/// A real vector encoded as `dim` concatenated codewords.
#[derive(Clone)]
pub struct Chromosome {
    table: Arc<EncodingTable>,
    bits: Vec<bool>,
}

impl Chromosome {
    /// Creates a chromosome with `dim` independently random codewords.
    pub fn random<R: Rng>(table: &Arc<EncodingTable>, dim: usize, rng: &mut R) -> Self {
        let mut bits = Vec::with_capacity(dim * table.bits());
        for _ in 0..dim {
            bits.extend_from_slice(table.random_codeword(rng).bits());
        }
        Self {
            table: Arc::clone(table),
            bits,
        }
    }

    /// Encodes a real vector component by component.
    ///
    /// Fails with [`EncodingError::UnknownValue`] when a component is not a
    /// grid point of the table's interval.
    pub fn from_vector(
        table: &Arc<EncodingTable>,
        vector: &[f64],
    ) -> Result<Self, EncodingError> {
        let mut bits = Vec::with_capacity(vector.len() * table.bits());
        for &x in vector {
            bits.extend_from_slice(table.encode(x)?.bits());
        }
        Ok(Self {
            table: Arc::clone(table),
            bits,
        })
    }

    /// Wraps an existing bitstring.
    ///
    /// The length must be a positive multiple of the table's bit width.
    pub fn from_bits(table: &Arc<EncodingTable>, bits: BitString) -> Result<Self, EncodingError> {
        if bits.is_empty() || bits.len() % table.bits() != 0 {
            return Err(EncodingError::CodewordWidth {
                expected: table.bits(),
                actual: bits.len(),
            });
        }
        Ok(Self {
            table: Arc::clone(table),
            bits: bits.bits().to_vec(),
        })
    }

    /// The encoding table interpreting this chromosome.
    pub fn table(&self) -> &Arc<EncodingTable> {
        &self.table
    }

    /// The full concatenated bitstring.
    pub fn bits(&self) -> BitString {
        BitString::new(self.bits.clone())
    }

    /// Total bit length (`dim × b`).
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the chromosome has zero bits (never true for constructed
    /// chromosomes).
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of encoded components.
    pub fn dimension(&self) -> usize {
        self.bits.len() / self.table.bits()
    }

    /// The genotype→phenotype map: splits the bitstring into consecutive
    /// width-`b` windows and decodes each independently. No other part of
    /// the crate reinterprets bits.
    pub fn decode(&self) -> Vec<f64> {
        self.bits
            .chunks(self.table.bits())
            .map(|window| self.table.decode_window(window))
            .collect()
    }

    /// Whether every window is a key of the encoding table.
    pub fn is_valid(&self) -> bool {
        self.bits.len() % self.table.bits() == 0
            && self
                .bits
                .chunks(self.table.bits())
                .all(|window| self.table.is_valid(&BitString::new(window.to_vec())))
    }

    /// Evaluates the objective on the decoded vector.
    ///
    /// Fails with [`GaError::DimensionMismatch`] when the decoded vector's
    /// length differs from the objective's declared input dimension.
    pub fn evaluate<F: ObjectiveFunction + ?Sized>(&self, objective: &F) -> Result<f64, GaError> {
        let vector = self.decode();
        if vector.len() != objective.input_dimension() {
            return Err(GaError::DimensionMismatch {
                expected: objective.input_dimension(),
                actual: vector.len(),
            });
        }
        Ok(objective.evaluate(&vector))
    }

    /// One-point crossover: a uniformly random cut in `[0, L]` swaps the
    /// tails of the two parents.
    ///
    /// Both children always have the parents' length. Windows straddling
    /// the cut may mix bits from both parents; over a complete table any
    /// full-width window still decodes, so no validity re-check is made.
    ///
    /// # Panics
    /// Panics if the parents' bitstring lengths differ.
    pub fn crossover<R: Rng>(&self, partner: &Self, rng: &mut R) -> (Self, Self) {
        assert_eq!(
            self.bits.len(),
            partner.bits.len(),
            "parents must have equal length"
        );
        let cut = rng.random_range(0..=self.bits.len());
        self.crossover_at(partner, cut)
    }

    fn crossover_at(&self, partner: &Self, cut: usize) -> (Self, Self) {
        let mut first = Vec::with_capacity(self.bits.len());
        first.extend_from_slice(&self.bits[..cut]);
        first.extend_from_slice(&partner.bits[cut..]);

        let mut second = Vec::with_capacity(self.bits.len());
        second.extend_from_slice(&partner.bits[..cut]);
        second.extend_from_slice(&self.bits[cut..]);

        (
            Self {
                table: Arc::clone(&self.table),
                bits: first,
            },
            Self {
                table: Arc::clone(&self.table),
                bits: second,
            },
        )
    }

    /// Independent per-bit mutation: every bit flips with probability
    /// `rate`, drawn fresh per bit. Returns a new chromosome; the original
    /// is untouched. `rate == 0.0` is an identity (modulo RNG draws) and
    /// `rate == 1.0` yields the full complement.
    ///
    /// # Panics
    /// Panics if `rate` is outside `[0, 1]`.
    pub fn mutate<R: Rng>(&self, rate: f64, rng: &mut R) -> Self {
        assert!((0.0..=1.0).contains(&rate), "mutation rate must be in [0, 1]");
        let bits = self
            .bits
            .iter()
            .map(|&b| if rng.random_bool(rate) { !b } else { b })
            .collect();
        Self {
            table: Arc::clone(&self.table),
            bits,
        }
    }

    /// Converts raw fitness into a non-negative selection weight using the
    /// single-generation scaling window: `f' - f` when minimizing and
    /// `f - f'` when maximizing, where `f'` is the current generation's
    /// scaling reference ([`Mode::scaling_reference`]). The generation's
    /// worst individual always gets weight zero.
    ///
    /// # Panics
    /// Panics if the fitness map does not contain this chromosome.
    pub fn performance_value(&self, fitness: &FitnessMap, f_prime: f64, mode: Mode) -> f64 {
        let own = fitness
            .get(self)
            .copied()
            .expect("fitness map must cover the population");
        match mode {
            Mode::Minimize => f_prime - own,
            Mode::Maximize => own - f_prime,
        }
    }
}

impl PartialEq for Chromosome {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for Chromosome {}

impl Hash for Chromosome {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chromosome({self})")
    }
}
