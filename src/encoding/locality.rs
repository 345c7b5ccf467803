//! Locality analysis of encodings.
//!
//! An encoding with poor locality turns a smooth fitness landscape over
//! the interval into a rugged one over bitstring space: points that are
//! far apart on the grid become Hamming neighbors, inducing extra local
//! optima. These utilities count and score the optima a landscape induces
//! under a given table, which is the standard way to compare candidate
//! encodings before running a search.

use super::bitstring::BitString;
use super::table::EncodingTable;
use crate::ga::Mode;

/// Counts weak optima of a value sequence under the cyclic 2-neighborhood
/// (each position compared with its predecessor and successor, wrapping).
///
/// Ties count as optima, matching the weak-inequality convention used for
/// induced optima below.
///
/// # Panics
/// Panics if `values` is empty.
pub fn count_cycle_optima(values: &[f64], mode: Mode) -> usize {
    assert!(!values.is_empty(), "cannot count optima of an empty sequence");
    let n = values.len();
    (0..n)
        .filter(|&i| {
            let prev = values[(i + n - 1) % n];
            let next = values[(i + 1) % n];
            mode.better_eq(values[i], prev) && mode.better_eq(values[i], next)
        })
        .count()
}

/// Returns the codewords (in grid-point order) that are weak local optima
/// of `landscape` under the table's Hamming neighborhood.
///
/// `landscape[i]` is the fitness of the grid point at index `i`; a
/// codeword is an induced optimum when none of its `b` Hamming neighbors
/// maps to a strictly better landscape value.
///
/// # Panics
/// Panics if `landscape.len() != table.point_count()`.
pub fn induced_optima(landscape: &[f64], table: &EncodingTable, mode: Mode) -> Vec<BitString> {
    assert_eq!(
        landscape.len(),
        table.point_count(),
        "landscape must assign a value to every grid point"
    );

    let mut optima = Vec::new();
    for index in 0..table.point_count() {
        let codeword = table.codeword_at(index);
        let own = landscape[index];
        let is_optimum = codeword.hamming_neighbors().iter().all(|neighbor| {
            let neighbor_index = table
                .point_of(neighbor)
                .expect("neighbor has the table's width");
            mode.better_eq(own, landscape[neighbor_index])
        });
        if is_optimum {
            optima.push(codeword);
        }
    }
    optima
}

/// Number of induced optima; see [`induced_optima`].
pub fn count_induced_optima(landscape: &[f64], table: &EncodingTable, mode: Mode) -> usize {
    induced_optima(landscape, table, mode).len()
}

/// Average fitness gap between the non-global induced maxima of a tent
/// landscape peaked at grid point `peak` and their Hamming neighborhoods,
/// less the global peak's own gap term, normalized by the number of such
/// optima times the bit width.
///
/// The tent landscape is `f(i) = peak - |i - peak|`, whose only optimum on
/// the grid itself is the peak; every further induced maximum is an
/// artifact of the encoding. Returns `0.0` when the encoding induces no
/// spurious optima (the degenerate case is a fallback, not an error).
///
/// # Panics
/// Panics if `peak` is not a grid point index of the table.
pub fn optima_fit_metric(peak: usize, table: &EncodingTable) -> f64 {
    assert!(peak < table.point_count(), "peak must be a grid point index");

    let landscape: Vec<f64> = (0..table.point_count())
        .map(|i| peak as f64 - (i as f64 - peak as f64).abs())
        .collect();

    let global = table.codeword_at(peak);
    let mut optima = induced_optima(&landscape, table, Mode::Maximize);
    optima.retain(|codeword| *codeword != global);
    if optima.is_empty() {
        return 0.0;
    }

    let value_of = |codeword: &BitString| {
        landscape[table.point_of(codeword).expect("codeword from this table")]
    };

    let mut sum = 0.0;
    for optimum in &optima {
        for neighbor in optimum.hamming_neighbors() {
            sum += (value_of(optimum) - value_of(&neighbor)).abs();
        }
    }
    for neighbor in global.hamming_neighbors() {
        sum -= (peak as f64 - value_of(&neighbor)).abs();
    }

    sum / (optima.len() * table.bits()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Interval;

    fn table_3bit(gray: bool) -> EncodingTable {
        // Integer grid 0..=7 on three bits.
        let interval = Interval::new(0.0, 7.0, 1.0).unwrap();
        if gray {
            EncodingTable::gray(interval).unwrap()
        } else {
            EncodingTable::binary(interval).unwrap()
        }
    }

    #[test]
    fn test_count_cycle_optima() {
        // Cyclic maxima at 5.0 and 3.0; minima at the 0.0s.
        let values = [0.0, 5.0, 0.0, 3.0];
        assert_eq!(count_cycle_optima(&values, Mode::Maximize), 2);
        assert_eq!(count_cycle_optima(&values, Mode::Minimize), 2);
    }

    #[test]
    fn test_count_cycle_optima_constant_sequence() {
        // Ties everywhere: every position is a weak optimum.
        let values = [1.0, 1.0, 1.0];
        assert_eq!(count_cycle_optima(&values, Mode::Maximize), 3);
    }

    #[test]
    fn test_monotone_landscape_single_optimum_under_gray() {
        // Strictly increasing landscape: under Gray every grid neighbor is
        // also a Hamming neighbor, so only the top point survives.
        let table = table_3bit(true);
        let landscape: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let optima = induced_optima(&landscape, &table, Mode::Maximize);
        assert_eq!(optima, vec![table.codeword_at(7)]);
    }

    #[test]
    fn test_binary_induces_spurious_optimum() {
        // Tent peaked at 3: under plain binary, 011 (value 3) and 100
        // (value 4... the peak's grid neighbor) are far apart in Hamming
        // space, so the encoding strands at least one extra maximum.
        let table = table_3bit(false);
        let peak = 3usize;
        let landscape: Vec<f64> = (0..8)
            .map(|i| peak as f64 - (i as f64 - peak as f64).abs())
            .collect();
        let optima = induced_optima(&landscape, &table, Mode::Maximize);
        assert!(optima.contains(&table.codeword_at(peak)));
        assert!(
            optima.len() > 1,
            "binary should induce spurious maxima, got {optima:?}"
        );
    }

    #[test]
    fn test_gray_tent_has_no_spurious_optima() {
        // Under Gray, the tent's grid neighborhood embeds into the Hamming
        // neighborhood, so the peak is the only induced maximum and the
        // metric falls back to zero.
        let table = table_3bit(true);
        let peak = 3usize;
        let landscape: Vec<f64> = (0..8)
            .map(|i| peak as f64 - (i as f64 - peak as f64).abs())
            .collect();
        assert_eq!(count_induced_optima(&landscape, &table, Mode::Maximize), 1);
        assert_eq!(optima_fit_metric(peak, &table), 0.0);
    }

    #[test]
    fn test_metric_value_for_binary_tent() {
        let table = table_3bit(false);
        // Tent peaked at 3 strands one spurious maximum at grid point 4
        // (code 100, value 2, neighbor gaps 2+2+1); the global peak's own
        // gaps are 4+2+1, so the signed sum is 5 - 7 over 1 optimum on
        // 3 bits.
        let metric = optima_fit_metric(3, &table);
        assert!((metric - (-2.0 / 3.0)).abs() < 1e-12, "got {metric}");
    }

    #[test]
    #[should_panic(expected = "landscape must assign a value")]
    fn test_landscape_length_checked() {
        let table = table_3bit(false);
        induced_optima(&[0.0; 4], &table, Mode::Maximize);
    }
}
