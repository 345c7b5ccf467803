//! Fixed-width bitstring value type.
//!
//! [`BitString`] is the codeword currency of the crate: encoding tables map
//! bitstrings to interval points, and chromosomes are concatenations of
//! them. Equality and hashing are by content, so bitstrings (and the
//! chromosomes built from them) can serve as fitness-map keys.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::EncodingError;

/// An immutable sequence of bits, written and parsed as a `'0'/'1'` string.
///
/// When interpreted as an integer index the leftmost bit is the most
/// significant, so `"0001"` is 1 and `"1000"` is 8.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Creates a bitstring from raw bits.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Creates the width-`width` bitstring whose integer value is `index`.
    ///
    /// # Panics
    /// Panics if `index` does not fit in `width` bits.
    pub fn from_index(index: usize, width: usize) -> Self {
        assert!(
            width >= usize::BITS as usize || index < (1usize << width),
            "index {index} does not fit in {width} bits"
        );
        let bits = (0..width).map(|i| (index >> (width - 1 - i)) & 1 == 1).collect();
        Self { bits }
    }

    /// Draws a uniformly random bitstring of the given width.
    pub fn random<R: Rng>(width: usize, rng: &mut R) -> Self {
        let bits = (0..width).map(|_| rng.random_bool(0.5)).collect();
        Self { bits }
    }

    /// The integer value of this bitstring, most significant bit first.
    pub fn as_index(&self) -> usize {
        self.bits.iter().fold(0usize, |acc, &b| (acc << 1) | usize::from(b))
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the bitstring has zero bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The raw bits, most significant first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The bit at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn bit(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// A copy with the bit at `index` flipped.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn with_flipped(&self, index: usize) -> Self {
        let mut bits = self.bits.clone();
        bits[index] = !bits[index];
        Self { bits }
    }

    /// The bitwise complement.
    pub fn complement(&self) -> Self {
        Self {
            bits: self.bits.iter().map(|&b| !b).collect(),
        }
    }

    /// All bitstrings at Hamming distance exactly one, in bit order.
    ///
    /// The result always has `len()` entries.
    pub fn hamming_neighbors(&self) -> Vec<BitString> {
        (0..self.bits.len()).map(|i| self.with_flipped(i)).collect()
    }

    /// Hamming distance to another bitstring of the same width.
    ///
    /// # Panics
    /// Panics if the widths differ.
    pub fn hamming_distance(&self, other: &Self) -> usize {
        assert_eq!(self.len(), other.len(), "bitstrings must have equal width");
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({self})")
    }
}

impl FromStr for BitString {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = Vec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => {
                    return Err(EncodingError::MalformedCodeword {
                        line: 0,
                        text: s.to_string(),
                    })
                }
            }
        }
        Ok(Self { bits })
    }
}
