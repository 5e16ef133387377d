//! # Counting Bloom Filter
//!
//! Tracks how many hash rounds landed on each set bit, so content can be
//! removed again without rebuilding the filter.
//!
//! ## Representation
//!
//! A sparse map `bit index -> occupancy`. Only set bits have an entry:
//! absence means count zero and an unset bit.
//!
//! ## Counting policy
//!
//! Counts grow once per hash round, not once per distinct bit of an item.
//! Two rounds of the same item landing on one bit add 2 to that bit.
//!
//! INVARIANTS:
//! - For every index `i`: bit `i` is set <=> `count(i) >= 1`.
//! - No entry ever holds a zero count.
//! - `merge` and `remove` return new filters; operands are untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::bit_set::BitSet;
use super::bloom_filter::BloomFilter;
use super::config::{FilterConfig, MAX_BITS};
use super::filter::Filter;
use super::proto::ProtoBloomFilter;
use crate::error::FilterError;

/// Bloom filter with per-bit occupancy counts
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CountingBloomFilter {
    bits: BitSet,
    counts: BTreeMap<usize, u32>,
}

/// Wire form: length plus the non-zero counts
#[derive(Serialize, Deserialize)]
struct CountingWire {
    number_of_bits: usize,
    counts: Vec<(usize, u32)>,
}

impl CountingBloomFilter {
    /// Materialize a proto under `config`, counting one per hash round
    pub fn from_proto(proto: &ProtoBloomFilter, config: &FilterConfig) -> Self {
        let mut counts = BTreeMap::new();
        for hash in proto.hashes() {
            for index in hash.indices(config) {
                increment(&mut counts, index, 1);
            }
        }
        Self::from_counts(config.number_of_bits(), counts)
    }

    /// A counting view of any filter: its own counts, or 1 per set bit
    pub fn from_filter(filter: &dyn Filter) -> Self {
        Self::from_counts(filter.number_of_bits(), filter.counts().collect())
    }

    /// `counts` must only hold non-zero entries below `number_of_bits`
    fn from_counts(number_of_bits: usize, counts: BTreeMap<usize, u32>) -> Self {
        let mut bits = BitSet::empty(number_of_bits);
        for &index in counts.keys() {
            bits.insert(index);
        }
        Self { bits, counts }
    }

    /// Occupancy counts of the set bits
    pub fn occupancy(&self) -> &BTreeMap<usize, u32> {
        &self.counts
    }

    /// Add `other`'s counts elementwise (1 per set bit for a standard filter)
    ///
    /// # Errors
    /// `SizeMismatch` if the filters have different lengths.
    pub fn merge(&self, other: &dyn Filter) -> Result<CountingBloomFilter, FilterError> {
        self.bits.ensure_same_len(other.bit_set())?;
        let mut counts = self.counts.clone();
        for (index, count) in other.counts() {
            increment(&mut counts, index, count);
        }
        trace!(
            bits = self.bits.len(),
            weight = counts.len(),
            "Merged counting Bloom filters"
        );
        Ok(Self::from_counts(self.bits.len(), counts))
    }

    /// Subtract `other`'s counts elementwise (1 per set bit for a standard
    /// filter), clearing every bit whose count reaches zero
    ///
    /// Counts never go below zero: removing more than was added simply
    /// clears the bit.
    ///
    /// # Errors
    /// `SizeMismatch` if the filters have different lengths.
    pub fn remove(&self, other: &dyn Filter) -> Result<CountingBloomFilter, FilterError> {
        self.bits.ensure_same_len(other.bit_set())?;
        let mut counts = self.counts.clone();
        let mut cleared = 0usize;
        for (index, count) in other.counts() {
            if let Some(current) = counts.get_mut(&index) {
                if *current > count {
                    *current -= count;
                } else {
                    counts.remove(&index);
                    cleared += 1;
                }
            }
        }
        if cleared > 0 {
            debug!(cleared, remaining = counts.len(), "Counting remove cleared bits");
        }
        Ok(Self::from_counts(self.bits.len(), counts))
    }

    /// Drop the counts, keeping the set bits
    pub fn to_bloom_filter(&self) -> BloomFilter {
        BloomFilter::from_bit_set(self.bits.clone())
    }

    /// Serialize the filter to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, FilterError> {
        let wire = CountingWire {
            number_of_bits: self.bits.len(),
            counts: self.counts.iter().map(|(&i, &c)| (i, c)).collect(),
        };
        Ok(bincode::serialize(&wire)?)
    }

    /// Deserialize a filter from bytes
    ///
    /// # Errors
    /// `Serialization` on malformed input, a length above [`MAX_BITS`],
    /// a zero count, a repeated index or an index outside the filter.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FilterError> {
        let wire: CountingWire = bincode::deserialize(bytes)?;
        if wire.number_of_bits > MAX_BITS {
            return Err(FilterError::Serialization(format!(
                "filter of {} bits exceeds the maximum of {}",
                wire.number_of_bits, MAX_BITS
            )));
        }
        let mut counts = BTreeMap::new();
        for (index, count) in wire.counts {
            if index >= wire.number_of_bits {
                return Err(FilterError::Serialization(format!(
                    "count for bit {} in a {}-bit filter",
                    index, wire.number_of_bits
                )));
            }
            if count == 0 {
                return Err(FilterError::Serialization(format!(
                    "zero count for bit {}",
                    index
                )));
            }
            if counts.insert(index, count).is_some() {
                return Err(FilterError::Serialization(format!(
                    "repeated count for bit {}",
                    index
                )));
            }
        }
        Ok(Self::from_counts(wire.number_of_bits, counts))
    }
}

fn increment(counts: &mut BTreeMap<usize, u32>, index: usize, by: u32) {
    let count = counts.entry(index).or_insert(0);
    match count.checked_add(by) {
        Some(sum) => *count = sum,
        None => {
            warn!(index, "Occupancy count saturated");
            *count = u32::MAX;
        }
    }
}

impl Filter for CountingBloomFilter {
    fn bit_set(&self) -> &BitSet {
        &self.bits
    }

    fn count(&self, index: usize) -> u32 {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    fn counts(&self) -> Box<dyn Iterator<Item = (usize, u32)> + '_> {
        Box::new(self.counts.iter().map(|(&index, &count)| (index, count)))
    }

    fn hamming_weight(&self) -> usize {
        self.counts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hash::Hash;
    use crate::domain::proto::Builder;

    fn one_two() -> CountingBloomFilter {
        let config = FilterConfig::new(1, 11).unwrap();
        CountingBloomFilter::from_proto(&ProtoBloomFilter::from_hashes([Hash::new(1, 2)]), &config)
    }

    fn counts_of(filter: &CountingBloomFilter) -> Vec<(usize, u32)> {
        filter.counts().collect()
    }

    fn assert_invariant(filter: &CountingBloomFilter) {
        for index in 0..filter.number_of_bits() {
            assert_eq!(
                filter.bit_set().contains(index),
                filter.count(index) >= 1,
                "Bit {} and its count disagree",
                index
            );
        }
        assert!(filter.occupancy().values().all(|&c| c >= 1));
    }

    #[test]
    fn test_from_proto_counts() {
        let filter = one_two();
        assert_eq!(counts_of(&filter), vec![(0, 1), (1, 1), (3, 1)]);
        assert_eq!(filter.hamming_weight(), 3);
        assert_invariant(&filter);
    }

    #[test]
    fn test_counts_per_round_not_per_bit() {
        let config = FilterConfig::new(1, 11).unwrap();
        let proto = ProtoBloomFilter::from_hashes([Hash::new(7, 0)]);
        let filter = CountingBloomFilter::from_proto(&proto, &config);
        assert_eq!(counts_of(&filter), vec![(2, 3)]);
        assert_eq!(filter.hamming_weight(), 1);
    }

    #[test]
    fn test_merge_identical_doubles_counts() {
        let filter = one_two();
        let merged = filter.merge(&one_two()).unwrap();
        assert_eq!(counts_of(&merged), vec![(0, 2), (1, 2), (3, 2)]);
        assert_eq!(merged.hamming_weight(), 3);
        assert_eq!(counts_of(&filter), vec![(0, 1), (1, 1), (3, 1)], "Operand untouched");
    }

    #[test]
    fn test_merge_standard_filter_adds_one_per_bit() {
        let standard = BloomFilter::from_bit_set(BitSet::from_indices(5, [1, 2]).unwrap());
        let merged = one_two().merge(&standard).unwrap();
        assert_eq!(counts_of(&merged), vec![(0, 1), (1, 2), (2, 1), (3, 1)]);
        assert_invariant(&merged);
    }

    #[test]
    fn test_remove_to_extinction() {
        let filter = one_two();
        let removed = filter.remove(&filter).unwrap();
        assert_eq!(removed.hamming_weight(), 0);
        assert!(removed.occupancy().is_empty(), "No zero-count entries");
        assert_eq!(removed.bit_set().count_ones(), 0);

        let doubled = filter.merge(&filter).unwrap();
        let once = doubled.remove(&one_two()).unwrap();
        assert_eq!(once, filter);
    }

    #[test]
    fn test_remove_standard_filter_subtracts_one_per_bit() {
        let doubled = one_two().merge(&one_two()).unwrap();
        let standard = doubled.to_bloom_filter();
        let removed = doubled.remove(&standard).unwrap();
        assert_eq!(counts_of(&removed), vec![(0, 1), (1, 1), (3, 1)]);
    }

    #[test]
    fn test_remove_clamps_at_zero() {
        let filter = one_two();
        let heavy = filter.merge(&filter).unwrap().merge(&filter).unwrap();
        let removed = filter.remove(&heavy).unwrap();
        assert!(removed.occupancy().is_empty());
        assert_invariant(&removed);
    }

    #[test]
    fn test_remove_ignores_bits_not_present() {
        let other = BloomFilter::from_bit_set(BitSet::from_indices(5, [2, 4]).unwrap());
        let removed = one_two().remove(&other).unwrap();
        assert_eq!(removed, one_two());
    }

    #[test]
    fn test_size_mismatch_fails() {
        let other = BloomFilter::from_bit_set(BitSet::empty(6));
        assert!(matches!(
            one_two().merge(&other),
            Err(FilterError::SizeMismatch { expected: 5, actual: 6 })
        ));
        assert!(one_two().remove(&other).is_err());
    }

    #[test]
    fn test_interop_with_standard_filter() {
        let config = FilterConfig::new(20, 50).unwrap();
        let proto = Builder::new().build_with("item");
        let standard = BloomFilter::from_proto(&proto, &config);
        let counting = CountingBloomFilter::from_proto(&proto, &config);

        assert_eq!(counting.to_bloom_filter(), standard);
        assert!(standard.matches(&counting).unwrap());
        assert!(counting.matches(&standard).unwrap());
        assert_eq!(counting.distance(&standard).unwrap(), 0);
        assert_eq!(CountingBloomFilter::from_filter(&standard).bit_set(), standard.bit_set());
    }

    #[test]
    fn test_saturating_increment() {
        let mut counts = BTreeMap::new();
        increment(&mut counts, 0, u32::MAX);
        increment(&mut counts, 0, 5);
        assert_eq!(counts[&0], u32::MAX);
    }

    #[test]
    fn test_serialization_roundtrip_and_validation() {
        let filter = one_two().merge(&one_two()).unwrap();
        let bytes = filter.to_bytes().unwrap();
        assert_eq!(CountingBloomFilter::from_bytes(&bytes).unwrap(), filter);

        let zero = bincode::serialize(&CountingWire {
            number_of_bits: 5,
            counts: vec![(1, 0)],
        })
        .unwrap();
        assert!(CountingBloomFilter::from_bytes(&zero).is_err());

        let out_of_range = bincode::serialize(&CountingWire {
            number_of_bits: 5,
            counts: vec![(5, 1)],
        })
        .unwrap();
        assert!(CountingBloomFilter::from_bytes(&out_of_range).is_err());
    }

    #[test]
    fn test_from_bytes_rejects_oversized_length() {
        let huge = bincode::serialize(&CountingWire {
            number_of_bits: usize::MAX,
            counts: Vec::new(),
        })
        .unwrap();
        assert!(matches!(
            CountingBloomFilter::from_bytes(&huge),
            Err(FilterError::Serialization(_))
        ));

        let just_over = bincode::serialize(&CountingWire {
            number_of_bits: MAX_BITS + 1,
            counts: Vec::new(),
        })
        .unwrap();
        assert!(CountingBloomFilter::from_bytes(&just_over).is_err());
    }
}
