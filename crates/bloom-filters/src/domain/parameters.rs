//! Optimal Bloom filter parameter calculation
//!
//! Formulas, for `n` items at a false positive rate of `1/p`:
//! - m = ceil(n * ln(p) / ln(2)^2)  -- optimal bits
//! - k = round((m/n) * ln(2))       -- optimal hash functions
//! - FPR = (1 - e^(-kn/m))^k

use std::f64::consts::LN_2;

/// Optimal number of bits for `num_items` items at 1-in-`probability`
///
/// Returned as `f64` so callers can guard against overflow before
/// narrowing to an integer size.
pub fn optimal_number_of_bits(num_items: u32, probability: u32) -> f64 {
    let n = f64::from(num_items);
    let p = 1.0 / f64::from(probability);
    (n * p.ln() / (LN_2 * LN_2)).abs().ceil()
}

/// Optimal number of hash functions for `m` bits holding `n` items, at least 1
pub fn optimal_number_of_hash_functions(m: usize, n: u32) -> usize {
    if n == 0 {
        return 1;
    }
    let k = ((m as f64 / f64::from(n)) * LN_2).round() as usize;
    k.max(1)
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn false_positive_rate(m: usize, n: u32, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * f64::from(n) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
