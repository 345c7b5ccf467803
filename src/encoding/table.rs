//! Bijective codeword-to-real encoding tables.
//!
//! An [`EncodingTable`] fixes, once per experiment, how width-`b`
//! bitstrings map onto the points of a discretized interval. The mapping is
//! a total bijection: all `2^b` codewords are present and the interval must
//! contribute exactly `2^b` points. Built-in layouts are plain binary count
//! order and the reflected binary Gray sequence; arbitrary permutations
//! (shuffled, worst-locality, or loaded from disk) use the same general
//! constructor.
//!
//! # References
//!
//! - Caruana & Schaffer (1988), "Representation and Hidden Bias: Gray vs.
//!   Binary Coding for Genetic Algorithms"
//! - Rothlauf (2006), *Representations for Genetic and Evolutionary
//!   Algorithms*

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::bitstring::BitString;
use super::interval::Interval;
use crate::error::EncodingError;

/// Immutable bijection between all width-`b` bitstrings and the points of a
/// discretized interval.
///
/// # Examples
///
/// ```
/// use bitrep::encoding::{EncodingTable, Interval};
///
/// let interval = Interval::new(0.0, 3.0, 1.0).unwrap();
/// let table = EncodingTable::binary(interval).unwrap();
/// assert_eq!(table.bits(), 2);
/// assert_eq!(table.decode(&"10".parse().unwrap()).unwrap(), 2.0);
/// ```
pub struct EncodingTable {
    name: String,
    interval: Interval,
    bits: usize,
    /// Grid point index for each codeword, indexed by codeword integer.
    point_for_code: Vec<u32>,
    /// Codeword integer for each grid point, indexed by point.
    code_for_point: Vec<u32>,
}

impl EncodingTable {
    /// Builds a table from an arbitrary ordered codeword list.
    ///
    /// `codewords[i]` maps to the `i`-th grid point. The list must be a
    /// permutation of all `2^b` width-`b` bitstrings and its length must
    /// equal the interval's point count — supplying an interval whose grid
    /// is not a power of two is a hard error, not silently tolerated.
    pub fn from_codewords(
        name: impl Into<String>,
        interval: Interval,
        codewords: Vec<BitString>,
    ) -> Result<Self, EncodingError> {
        let points = interval.point_count();
        if codewords.len() != points {
            return Err(EncodingError::SizeMismatch {
                codewords: codewords.len(),
                points,
            });
        }
        let bits = match codewords.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => {
                return Err(EncodingError::SizeMismatch {
                    codewords: 0,
                    points,
                })
            }
        };
        if codewords.len() != 1usize << bits {
            return Err(EncodingError::SizeMismatch {
                codewords: codewords.len(),
                points: 1usize << bits,
            });
        }

        let mut point_for_code = vec![u32::MAX; 1usize << bits];
        let mut code_for_point = vec![0u32; points];
        for (point, cw) in codewords.iter().enumerate() {
            if cw.len() != bits {
                return Err(EncodingError::CodewordWidth {
                    expected: bits,
                    actual: cw.len(),
                });
            }
            let code = cw.as_index();
            if point_for_code[code] != u32::MAX {
                return Err(EncodingError::DuplicateCodeword(cw.to_string()));
            }
            point_for_code[code] = point as u32;
            code_for_point[point] = code as u32;
        }

        Ok(Self {
            name: name.into(),
            interval,
            bits,
            point_for_code,
            code_for_point,
        })
    }

    /// Binary count order: `000…`, `001…`, … mapped to consecutive grid
    /// points, with the minimum covering bit width.
    pub fn binary(interval: Interval) -> Result<Self, EncodingError> {
        Self::binary_with_width(interval, interval.bits_required())
    }

    /// Binary count order at an explicit bit width.
    pub fn binary_with_width(interval: Interval, width: usize) -> Result<Self, EncodingError> {
        let codewords = (0..1usize << width)
            .map(|i| BitString::from_index(i, width))
            .collect();
        Self::from_codewords("binary", interval, codewords)
    }

    /// Reflected binary Gray sequence mapped to consecutive grid points:
    /// adjacent points differ in exactly one bit.
    pub fn gray(interval: Interval) -> Result<Self, EncodingError> {
        Self::gray_with_width(interval, interval.bits_required())
    }

    /// Reflected binary Gray sequence at an explicit bit width.
    pub fn gray_with_width(interval: Interval, width: usize) -> Result<Self, EncodingError> {
        let codewords = (0..1usize << width)
            .map(|i| BitString::from_index(i ^ (i >> 1), width))
            .collect();
        Self::from_codewords("binary reflected gray", interval, codewords)
    }

    /// A uniformly shuffled permutation of all codewords; used to study
    /// arbitrary localities.
    pub fn random_permutation<R: Rng>(
        interval: Interval,
        rng: &mut R,
    ) -> Result<Self, EncodingError> {
        let width = interval.bits_required();
        let mut codewords: Vec<BitString> = (0..1usize << width)
            .map(|i| BitString::from_index(i, width))
            .collect();
        codewords.shuffle(rng);
        Self::from_codewords("random permutation", interval, codewords)
    }

    /// Worst-locality layout (Harper construction): a random start codeword
    /// maps to the first grid point, the remaining codewords of the same
    /// parity (shuffled) fill the points up to `2^(b-1)`, and the
    /// opposite-parity codewords (shuffled) fill the upper half. Every
    /// Hamming neighbor of the start lands in the far half of the interval.
    pub fn worst_locality<R: Rng>(
        interval: Interval,
        rng: &mut R,
    ) -> Result<Self, EncodingError> {
        let width = interval.bits_required();
        let all: Vec<BitString> = (0..1usize << width)
            .map(|i| BitString::from_index(i, width))
            .collect();

        let start = all[rng.random_range(0..all.len())].clone();
        let parity = start.count_ones() % 2;

        let mut same: Vec<BitString> = all
            .iter()
            .filter(|cw| cw.count_ones() % 2 == parity && **cw != start)
            .cloned()
            .collect();
        let mut opposite: Vec<BitString> = all
            .iter()
            .filter(|cw| cw.count_ones() % 2 != parity)
            .cloned()
            .collect();
        same.shuffle(rng);
        opposite.shuffle(rng);

        let mut codewords = Vec::with_capacity(all.len());
        codewords.push(start);
        codewords.extend(same);
        codewords.extend(opposite);
        Self::from_codewords("worst locality", interval, codewords)
    }

    /// Human-readable layout name, used in run labels.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Codeword bit width `b`.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// The interval this table discretizes.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Number of grid points (equal to `2^b`).
    pub fn point_count(&self) -> usize {
        self.code_for_point.len()
    }

    /// The real number a codeword maps to.
    ///
    /// Fails with [`EncodingError::UnknownCodeword`] when the bitstring is
    /// not a key of the table (wrong width).
    pub fn decode(&self, codeword: &BitString) -> Result<f64, EncodingError> {
        if codeword.len() != self.bits {
            return Err(EncodingError::UnknownCodeword(codeword.to_string()));
        }
        Ok(self.interval.value(self.point_for_code[codeword.as_index()] as usize))
    }

    /// The codeword a grid value maps to.
    ///
    /// Fails with [`EncodingError::UnknownValue`] when `x` is not a grid
    /// point.
    pub fn encode(&self, x: f64) -> Result<BitString, EncodingError> {
        let index = self
            .interval
            .index_of(x)
            .ok_or(EncodingError::UnknownValue(x))?;
        Ok(self.codeword_at(index))
    }

    /// The codeword assigned to the grid point at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn codeword_at(&self, index: usize) -> BitString {
        BitString::from_index(self.code_for_point[index] as usize, self.bits)
    }

    /// The grid point index a codeword maps to; the inverse of
    /// [`codeword_at`](Self::codeword_at).
    pub fn point_of(&self, codeword: &BitString) -> Result<usize, EncodingError> {
        if codeword.len() != self.bits {
            return Err(EncodingError::UnknownCodeword(codeword.to_string()));
        }
        Ok(self.point_for_code[codeword.as_index()] as usize)
    }

    /// All codewords at Hamming distance one; always `bits()` entries.
    pub fn neighbors(&self, codeword: &BitString) -> Result<Vec<BitString>, EncodingError> {
        if codeword.len() != self.bits {
            return Err(EncodingError::UnknownCodeword(codeword.to_string()));
        }
        Ok(codeword.hamming_neighbors())
    }

    /// Whether a bitstring is a key of this table.
    pub fn is_valid(&self, codeword: &BitString) -> bool {
        codeword.len() == self.bits
    }

    /// A uniformly random codeword.
    pub fn random_codeword<R: Rng>(&self, rng: &mut R) -> BitString {
        BitString::from_index(rng.random_range(0..self.point_for_code.len()), self.bits)
    }

    /// Decode for a window borrowed out of a chromosome. The window width
    /// is guaranteed by chromosome construction.
    pub(crate) fn decode_window(&self, window: &[bool]) -> f64 {
        debug_assert_eq!(window.len(), self.bits);
        let code = window.iter().fold(0usize, |acc, &b| (acc << 1) | usize::from(b));
        self.interval.value(self.point_for_code[code] as usize)
    }
}

impl fmt::Debug for EncodingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingTable")
            .field("name", &self.name)
            .field("bits", &self.bits)
            .field("interval", &self.interval)
            .finish()
    }
}
