//! Bit-distribution statistics.
//!
//! Two estimators over a flat bit sequence: Shannon entropy of the
//! empirical 0/1 distribution, and Pearson's chi-square against a uniform
//! 50/50 split. Both are raw comparable scores; no significance thresholds
//! are applied here, consumers interpret magnitudes relatively.

use crate::extraction::{BitSequence, Plane};
use serde::Serialize;

/// Shannon entropy of the bit distribution, in bits per symbol.
///
/// With a two-symbol alphabet the result lies in [0, 1]: 0 for a constant
/// sequence, 1 for an exact 50/50 split. Zero-probability symbols
/// contribute nothing (they are filtered before the logarithm). An empty
/// sequence has entropy 0 by definition.
pub fn entropy(bits: &BitSequence) -> f64 {
    let total = bits.len();
    if total == 0 {
        return 0.0;
    }

    let p1 = bits.count_ones() as f64 / total as f64;
    let p0 = 1.0 - p1;

    let mut entropy = 0.0;
    for p in [p0, p1] {
        if p > 0.0 {
            entropy -= p * p.log2();
        }
    }
    entropy
}

/// Pearson chi-square statistic against a uniform 50/50 bit distribution.
///
/// With expected counts `n/2` for each symbol, the statistic is
/// `(obs0 - exp)^2/exp + (obs1 - exp)^2/exp`. Always non-negative, zero
/// for a perfectly balanced sequence, and unbounded above. An empty
/// sequence scores 0 by definition.
pub fn chi_square(bits: &BitSequence) -> f64 {
    let total = bits.len();
    if total == 0 {
        return 0.0;
    }

    let obs1 = bits.count_ones() as f64;
    let obs0 = total as f64 - obs1;
    let exp = total as f64 / 2.0;

    (obs0 - exp).powi(2) / exp + (obs1 - exp).powi(2) / exp
}

/// Statistics for one bit plane of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaneStats {
    /// Plane index, 0 (LSB) through 7 (MSB).
    pub plane: u8,
    /// Shannon entropy of the plane's bits, in [0, 1].
    pub entropy: f64,
    /// Chi-square score of the plane's bits, >= 0.
    pub chi2: f64,
}

impl PlaneStats {
    /// Computes both statistics for a plane's bit sequence.
    pub fn measure(plane: Plane, bits: &BitSequence) -> Self {
        Self {
            plane: plane.index(),
            entropy: entropy(bits),
            chi2: chi_square(bits),
        }
    }
}
