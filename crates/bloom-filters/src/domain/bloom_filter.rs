//! Standard Bloom filter
//!
//! INVARIANTS:
//! - The bit vector never changes after construction; `merge` returns a
//!   new filter.
//! - Equality and hashing follow the bit pattern only, not history.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::bit_set::BitSet;
use super::config::FilterConfig;
use super::filter::Filter;
use super::proto::ProtoBloomFilter;
use crate::error::FilterError;

/// Immutable Bloom filter
///
/// Safe to share read-only across threads.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BloomFilter {
    bits: BitSet,
}

impl BloomFilter {
    /// Wrap an existing bit vector
    pub fn from_bit_set(bits: BitSet) -> Self {
        Self { bits }
    }

    /// Materialize a proto under `config`: every hash round of every item
    /// turns on one bit
    pub fn from_proto(proto: &ProtoBloomFilter, config: &FilterConfig) -> Self {
        let mut bits = BitSet::empty(config.number_of_bits());
        for hash in proto.hashes() {
            hash.populate(&mut bits, config);
        }
        Self { bits }
    }

    /// Union of both filters' bits
    ///
    /// # Errors
    /// `SizeMismatch` if the filters have different lengths.
    pub fn merge(&self, other: &dyn Filter) -> Result<BloomFilter, FilterError> {
        let bits = self.bits.union(other.bit_set())?;
        trace!(
            bits = bits.len(),
            weight = bits.count_ones(),
            "Merged Bloom filters"
        );
        Ok(Self { bits })
    }

    /// Serialize the filter to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, FilterError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize a filter from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FilterError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Filter for BloomFilter {
    fn bit_set(&self) -> &BitSet {
        &self.bits
    }
}

impl From<BitSet> for BloomFilter {
    fn from(bits: BitSet) -> Self {
        Self::from_bit_set(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hash::Hash;
    use crate::domain::proto::Builder;

    fn filter_of(len: usize, ones: &[usize]) -> BloomFilter {
        BloomFilter::from_bit_set(BitSet::from_indices(len, ones.iter().copied()).unwrap())
    }

    #[test]
    fn test_from_proto_single_hash() {
        let config = FilterConfig::new(1, 11).unwrap();
        let proto = ProtoBloomFilter::from_hashes([Hash::new(1, 2)]);
        let filter = BloomFilter::from_proto(&proto, &config);

        assert_eq!(filter.bit_set().ones().collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(filter.hamming_weight(), 3);
        assert_eq!(filter.number_of_bits(), 5);
    }

    #[test]
    fn test_inserted_items_match() {
        let config = FilterConfig::new(50, 100).unwrap();
        let mut builder = Builder::new();
        for i in 0..50 {
            builder.update_str(&format!("address_{:04x}", i));
        }
        let filter = BloomFilter::from_proto(&builder.build(), &config);

        // No false negatives: each item's own filter is contained in the whole
        for i in 0..50 {
            let single = Builder::new().build_with(format!("address_{:04x}", i));
            let probe = BloomFilter::from_proto(&single, &config);
            assert!(
                probe.matches(&filter).unwrap(),
                "False negative for address_{:04x}",
                i
            );
        }
    }

    #[test]
    fn test_merge_is_union_and_leaves_operands() {
        let a = filter_of(16, &[1, 4]);
        let b = filter_of(16, &[4, 15]);
        let merged = a.merge(&b).unwrap();

        assert_eq!(merged, filter_of(16, &[1, 4, 15]));
        assert_eq!(a, filter_of(16, &[1, 4]), "Merge must not touch operands");
        assert!(a.matches(&merged).unwrap());
        assert!(merged.inverse_matches(&b).unwrap());
    }

    #[test]
    fn test_match_is_directional() {
        let small = filter_of(10, &[2]);
        let large = filter_of(10, &[2, 7]);
        assert!(small.matches(&large).unwrap());
        assert!(!large.matches(&small).unwrap());
        assert!(large.inverse_matches(&small).unwrap());
        assert!(!small.inverse_matches(&large).unwrap());
    }

    #[test]
    fn test_distance() {
        let a = filter_of(10, &[0, 1, 2]);
        let b = filter_of(10, &[2, 3]);
        assert_eq!(a.distance(&b).unwrap(), 3);
        assert_eq!(b.distance(&a).unwrap(), 3);
        assert_eq!(a.distance(&a).unwrap(), 0);
    }

    #[test]
    fn test_mismatched_sizes_fail() {
        let a = filter_of(10, &[1]);
        let b = filter_of(12, &[1]);
        assert!(matches!(a.merge(&b), Err(FilterError::SizeMismatch { .. })));
        assert!(a.matches(&b).is_err());
        assert!(a.inverse_matches(&b).is_err());
        assert!(a.distance(&b).is_err());
    }

    #[test]
    fn test_log() {
        assert_eq!(filter_of(10, &[]).log(), 0.0);
        assert_eq!(filter_of(10, &[3]).log(), 3.0);
        // log2(2^0 + 2^1) = log2(3)
        assert!((filter_of(10, &[0, 1]).log() - 3f64.log2()).abs() < 1e-12);
        // A far lower bit barely moves the result
        let log = filter_of(2000, &[5, 1500]).log();
        assert!(log >= 1500.0 && log < 1500.001, "Got {}", log);
    }

    #[test]
    fn test_equality_follows_bits_only() {
        let config = FilterConfig::new(1, 11).unwrap();
        let direct = filter_of(5, &[0, 1, 3]);
        let built =
            BloomFilter::from_proto(&ProtoBloomFilter::from_hashes([Hash::new(1, 2)]), &config);
        let merged = built.merge(&built).unwrap();
        assert_eq!(direct, built);
        assert_eq!(merged, built);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let filter = filter_of(37, &[0, 9, 36]);
        let bytes = filter.to_bytes().unwrap();
        let restored = BloomFilter::from_bytes(&bytes).unwrap();
        assert_eq!(restored, filter);
        assert!(BloomFilter::from_bytes(&[1, 2, 3]).is_err());
    }
}
