//! Optimization direction.
//!
//! [`Mode`] carries the comparison and the scaling-window extremum choice
//! as part of its contract, so no caller ever passes a comparator around.

use std::fmt;

/// Whether the objective is minimized or maximized.
///
/// All fitness comparisons and the per-generation scaling reference go
/// through this type; raw fitness values are never sign-inverted anywhere
/// else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Lower raw fitness is better.
    Minimize,
    /// Higher raw fitness is better.
    Maximize,
}

impl Mode {
    /// Whether fitness `a` is strictly better than `b`.
    pub fn better(self, a: f64, b: f64) -> bool {
        match self {
            Mode::Minimize => a < b,
            Mode::Maximize => a > b,
        }
    }

    /// Whether fitness `a` is at least as good as `b`.
    pub fn better_eq(self, a: f64, b: f64) -> bool {
        match self {
            Mode::Minimize => a <= b,
            Mode::Maximize => a >= b,
        }
    }

    /// Seed value for a running best: the worst representable fitness.
    pub fn worst(self) -> f64 {
        match self {
            Mode::Minimize => f64::INFINITY,
            Mode::Maximize => f64::NEG_INFINITY,
        }
    }

    /// The scaling-window reference `f'` over one generation's raw fitness
    /// values: the maximum when minimizing, the minimum when maximizing.
    ///
    /// The window covers exactly the current generation, so the worst
    /// individual always ends up with performance weight zero.
    pub fn scaling_reference<I>(self, values: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        match self {
            Mode::Minimize => values.into_iter().fold(f64::NEG_INFINITY, f64::max),
            Mode::Maximize => values.into_iter().fold(f64::INFINITY, f64::min),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Minimize => f.write_str("minimize"),
            Mode::Maximize => f.write_str("maximize"),
        }
    }
}
