//! Read-only operations shared by standard and counting filters
//!
//! Every binary operation takes `&dyn Filter`, so a standard filter and a
//! counting filter can be compared, merged or removed against each other.

use super::bit_set::BitSet;
use crate::error::FilterError;

/// A Bloom filter viewed as a bit vector with per-bit occupancy counts
pub trait Filter {
    /// The set bits
    fn bit_set(&self) -> &BitSet;

    /// Occupancy of `index`; a standard filter counts each set bit once
    fn count(&self, index: usize) -> u32 {
        u32::from(self.bit_set().contains(index))
    }

    /// `(index, occupancy)` for every set bit, ascending by index
    fn counts(&self) -> Box<dyn Iterator<Item = (usize, u32)> + '_> {
        Box::new(self.bit_set().ones().map(|index| (index, 1)))
    }

    /// Length of the bit vector
    fn number_of_bits(&self) -> usize {
        self.bit_set().len()
    }

    /// Number of set bits
    fn hamming_weight(&self) -> usize {
        self.bit_set().count_ones()
    }

    /// Log-scale magnitude: `log2(sum of 2^i)` over set bits `i`
    ///
    /// Accumulated from the lowest bit with a stable log-sum-exp, so the
    /// result sits at or just above the highest set bit. 0.0 when empty.
    fn log(&self) -> f64 {
        self.bit_set()
            .ones()
            .map(|index| index as f64)
            .reduce(|acc, index| {
                let (high, low) = if acc >= index { (acc, index) } else { (index, acc) };
                high + (1.0 + (low - high).exp2()).log2()
            })
            .unwrap_or(0.0)
    }

    /// Hamming distance: number of bit positions that differ
    fn distance(&self, other: &dyn Filter) -> Result<usize, FilterError> {
        self.bit_set().symmetric_difference_count(other.bit_set())
    }

    /// True when every bit set here is also set in `other`
    fn matches(&self, other: &dyn Filter) -> Result<bool, FilterError> {
        self.bit_set().is_subset(other.bit_set())
    }

    /// True when every bit set in `other` is also set here (`other.matches(self)`)
    fn inverse_matches(&self, other: &dyn Filter) -> Result<bool, FilterError> {
        other.bit_set().is_subset(self.bit_set())
    }
}
