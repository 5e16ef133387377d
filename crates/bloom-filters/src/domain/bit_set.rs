//! Immutable bit vector backing every filter
//!
//! INVARIANTS:
//! - No public operation mutates a `BitSet` in place; set operations
//!   return a new value.
//! - Storage bits past `len` in the last byte are always zero, so byte-wise
//!   OR/XOR/subset over the raw slice only ever see live bits.

use bitvec::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FilterError;

/// A fixed-length set of bit positions
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    bits: BitVec<u8, Lsb0>,
}

impl BitSet {
    /// Create an all-zero bit set of `len` bits
    pub fn empty(len: usize) -> Self {
        Self {
            bits: bitvec![u8, Lsb0; 0; len],
        }
    }

    /// Create a bit set of `len` bits with the given positions turned on
    ///
    /// Duplicate indices are allowed; an index `>= len` is rejected.
    pub fn from_indices<I>(len: usize, indices: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::empty(len);
        for index in indices {
            if index >= len {
                return Err(FilterError::IndexOutOfRange { index, len });
            }
            set.insert(index);
        }
        Ok(set)
    }

    /// Rebuild a bit set from its little-endian byte form (see [`BitSet::to_bytes`])
    ///
    /// Bits in `bytes` beyond `len` are ignored.
    pub fn from_bytes(bytes: &[u8], len: usize) -> Result<Self, FilterError> {
        if bytes.len() < len.div_ceil(8) {
            return Err(FilterError::Serialization(format!(
                "{} bytes cannot hold {} bits",
                bytes.len(),
                len
            )));
        }
        let source = BitSlice::<u8, Lsb0>::from_slice(bytes);
        // Copy live bits only so the dead tail stays zero
        Self::from_indices(len, source[..len].iter_ones())
    }

    /// The raw storage bytes, bit `i` at byte `i / 8`, position `i % 8`
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits.as_raw_slice().to_vec()
    }

    /// Length in bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when the set has a length of zero bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True when `index` is turned on; out-of-range indices are never on
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).map(|bit| *bit).unwrap_or(false)
    }

    /// Number of bits turned on
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Positions turned on, ascending
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Bitwise OR of two equal-length sets
    pub fn union(&self, other: &BitSet) -> Result<BitSet, FilterError> {
        self.ensure_same_len(other)?;
        let mut bits = self.bits.clone();
        for (s, o) in bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *s |= *o;
        }
        Ok(BitSet { bits })
    }

    /// Number of positions where the two sets differ (cardinality of XOR)
    pub fn symmetric_difference_count(&self, other: &BitSet) -> Result<usize, FilterError> {
        self.ensure_same_len(other)?;
        Ok(self
            .bits
            .as_raw_slice()
            .iter()
            .zip(other.bits.as_raw_slice())
            .map(|(s, o)| (s ^ o).count_ones() as usize)
            .sum())
    }

    /// True when every bit on in `self` is also on in `other`
    pub fn is_subset(&self, other: &BitSet) -> Result<bool, FilterError> {
        self.ensure_same_len(other)?;
        Ok(self
            .bits
            .as_raw_slice()
            .iter()
            .zip(other.bits.as_raw_slice())
            .all(|(s, o)| s & !o == 0))
    }

    pub(crate) fn insert(&mut self, index: usize) {
        self.bits.set(index, true);
    }

    pub(crate) fn ensure_same_len(&self, other: &BitSet) -> Result<(), FilterError> {
        if self.len() != other.len() {
            return Err(FilterError::SizeMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitSet")
            .field("len", &self.len())
            .field("ones", &self.ones().collect::<Vec<_>>())
            .finish()
    }
}

impl Serialize for BitSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.to_bytes(), self.len()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BitSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (bytes, len): (Vec<u8>, usize) = Deserialize::deserialize(deserializer)?;
        BitSet::from_bytes(&bytes, len).map_err(serde::de::Error::custom)
    }
}
