//! Precomputed permutation tables persisted on disk.
//!
//! Research encodings that are expensive to derive (e.g. optimized or
//! pathological localities) are stored as plain text, one codeword per
//! line, in files named `{family}_{width}.txt`. Only a fixed set of bit
//! widths has precomputed tables; requesting any other width is an error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::bitstring::BitString;
use super::interval::Interval;
use super::table::EncodingTable;
use crate::error::EncodingError;

/// Bit widths with precomputed permutation files.
pub const SUPPORTED_WIDTHS: &[usize] = &[8, 10, 12, 17];

/// A directory of persisted permutation files for one encoding family.
///
/// # Examples
///
/// ```no_run
/// use bitrep::encoding::{Interval, PermutationStore};
///
/// let store = PermutationStore::new("tables", "UBL");
/// let interval = Interval::new(-1.28, 1.27, 0.01).unwrap();
/// let table = store.table(interval).unwrap(); // reads tables/UBL_8.txt
/// assert_eq!(table.name(), "UBL");
/// ```
#[derive(Debug, Clone)]
pub struct PermutationStore {
    dir: PathBuf,
    family: String,
}

impl PermutationStore {
    /// Creates a store rooted at `dir` for the named encoding family.
    pub fn new(dir: impl AsRef<Path>, family: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            family: family.into(),
        }
    }

    /// The file holding the permutation for `width` bits.
    pub fn path_for(&self, width: usize) -> PathBuf {
        self.dir.join(format!("{}_{}.txt", self.family, width))
    }

    /// Loads the ordered codeword list for `width` bits.
    ///
    /// Fails with [`EncodingError::UnsupportedWidth`] when no precomputed
    /// table exists for the width, and with
    /// [`EncodingError::MalformedCodeword`] (carrying the 1-based line
    /// number) when a line is not a width-`width` bitstring. Blank lines
    /// are ignored.
    pub fn load(&self, width: usize) -> Result<Vec<BitString>, EncodingError> {
        if !SUPPORTED_WIDTHS.contains(&width) {
            return Err(EncodingError::UnsupportedWidth {
                width,
                supported: SUPPORTED_WIDTHS,
            });
        }

        let file = File::open(self.path_for(width))?;
        let reader = BufReader::new(file);
        let mut codewords = Vec::with_capacity(1usize << width);
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            let codeword: BitString =
                text.parse().map_err(|_| EncodingError::MalformedCodeword {
                    line: number + 1,
                    text: text.to_string(),
                })?;
            if codeword.len() != width {
                return Err(EncodingError::MalformedCodeword {
                    line: number + 1,
                    text: text.to_string(),
                });
            }
            codewords.push(codeword);
        }
        Ok(codewords)
    }

    /// Builds the encoding table for `interval`, reading the permutation
    /// for `interval.bits_required()` bits.
    pub fn table(&self, interval: Interval) -> Result<EncodingTable, EncodingError> {
        let codewords = self.load(interval.bits_required())?;
        EncodingTable::from_codewords(self.family.clone(), interval, codewords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    /// Writes a width-8 permutation file (plain count order) and returns
    /// the store.
    fn store_with_binary_8(dir: &Path, family: &str) -> PermutationStore {
        let store = PermutationStore::new(dir, family);
        let mut file = File::create(store.path_for(8)).unwrap();
        for i in 0..256usize {
            writeln!(file, "{}", BitString::from_index(i, 8)).unwrap();
        }
        store
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = store_with_binary_8(dir.path(), "UBL");

        let codewords = store.load(8).unwrap();
        assert_eq!(codewords.len(), 256);
        assert_eq!(codewords[5].as_index(), 5);
    }

    #[test]
    fn test_table_from_store() {
        let dir = tempdir().unwrap();
        let store = store_with_binary_8(dir.path(), "NGG");

        let interval = Interval::new(-1.28, 1.27, 0.01).unwrap();
        let table = store.table(interval).unwrap();
        assert_eq!(table.name(), "NGG");
        assert_eq!(table.bits(), 8);
        // Count-order file reproduces the binary layout.
        assert_eq!(table.decode(&"00000000".parse().unwrap()).unwrap(), -1.28);
    }

    #[test]
    fn test_unsupported_width() {
        let store = PermutationStore::new("anywhere", "UBL");
        let err = store.load(9).unwrap_err();
        assert!(matches!(err, EncodingError::UnsupportedWidth { width: 9, .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let store = PermutationStore::new(dir.path(), "UBL");
        assert!(matches!(store.load(8), Err(EncodingError::Io(_))));
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let dir = tempdir().unwrap();
        let store = PermutationStore::new(dir.path(), "UBL");
        let mut file = File::create(store.path_for(8)).unwrap();
        writeln!(file, "00000000").unwrap();
        writeln!(file, "0000000x").unwrap();
        drop(file);

        let err = store.load(8).unwrap_err();
        assert!(matches!(err, EncodingError::MalformedCodeword { line: 2, .. }));
    }

    #[test]
    fn test_wrong_width_line_rejected() {
        let dir = tempdir().unwrap();
        let store = PermutationStore::new(dir.path(), "UBL");
        let mut file = File::create(store.path_for(8)).unwrap();
        writeln!(file, "0000").unwrap();
        drop(file);

        let err = store.load(8).unwrap_err();
        assert!(matches!(err, EncodingError::MalformedCodeword { line: 1, .. }));
    }
}
