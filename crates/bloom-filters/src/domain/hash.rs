//! Hash pairs and bit population
//!
//! Uses double hashing (Kirsch-Mitzenmacher): the i-th bit index of an
//! item is `(h1 + i * h2) mod m`, so k indices cost one digest.

use serde::{Deserialize, Serialize};

use super::bit_set::BitSet;
use super::config::FilterConfig;
use crate::ports::{HashFunction, ProcessType};

/// Compact summary of one item under one hash algorithm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash {
    h1: i64,
    h2: i64,
}

impl Hash {
    pub fn new(h1: i64, h2: i64) -> Self {
        Self { h1, h2 }
    }

    /// Summarize `buffer` with `function`
    ///
    /// `h1` is the seed-0 value. For a cyclic function `h2` is the step
    /// between consecutive seeds, so `h1 + i * h2` equals `apply(buffer, i)`;
    /// for an iterative function `h2` is the seed-1 value.
    pub fn from_function<H>(function: &mut H, buffer: &[u8]) -> Self
    where
        H: HashFunction + ?Sized,
    {
        let h1 = function.apply(buffer, 0);
        let seed_one = function.apply(buffer, 1);
        let h2 = match function.process_type() {
            ProcessType::Cyclic => seed_one.wrapping_sub(h1),
            ProcessType::Iterative => seed_one,
        };
        Self { h1, h2 }
    }

    pub fn h1(&self) -> i64 {
        self.h1
    }

    pub fn h2(&self) -> i64 {
        self.h2
    }

    /// The `number_of_hash_functions` bit indices for `config`, one per round
    ///
    /// Rounds may land on the same index; `h2 == 0` collapses every round
    /// onto `h1 mod m`. Both are legal and not filtered out.
    pub fn indices(&self, config: &FilterConfig) -> impl Iterator<Item = usize> {
        let (h1, h2) = (self.h1, self.h2);
        let m = config.number_of_bits() as i64;
        (0..config.number_of_hash_functions() as i64).map(move |i| {
            let combined = h1.wrapping_add(i.wrapping_mul(h2));
            combined.rem_euclid(m) as usize
        })
    }

    /// Turn on this item's bits in `bits`
    ///
    /// `bits` must be `config.number_of_bits()` long.
    pub(crate) fn populate(&self, bits: &mut BitSet, config: &FilterConfig) {
        debug_assert_eq!(bits.len(), config.number_of_bits());
        for index in self.indices(config) {
            bits.insert(index);
        }
    }

    /// A fresh bit set holding only this item's bits
    pub fn to_bit_set(&self, config: &FilterConfig) -> BitSet {
        let mut bits = BitSet::empty(config.number_of_bits());
        self.populate(&mut bits, config);
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Murmur128x64Cyclic, SipHashIterative};

    #[test]
    fn test_populate_one_two() {
        let config = FilterConfig::new(1, 11).unwrap();
        let bits = Hash::new(1, 2).to_bit_set(&config);

        // 1 mod 5 = 1, 3 mod 5 = 3, 5 mod 5 = 0
        assert_eq!(bits.ones().collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(bits.count_ones(), 3);
    }

    #[test]
    fn test_negative_values_wrap_to_non_negative_index() {
        let config = FilterConfig::new(1, 11).unwrap();
        let indices: Vec<usize> = Hash::new(-1, -2).indices(&config).collect();
        // -1 -> 4, -3 -> 2, -5 -> 0
        assert_eq!(indices, vec![4, 2, 0]);
    }

    #[test]
    fn test_zero_step_collapses_rounds() {
        let config = FilterConfig::new(1, 11).unwrap();
        let indices: Vec<usize> = Hash::new(7, 0).indices(&config).collect();
        assert_eq!(indices, vec![2, 2, 2]);
        assert_eq!(Hash::new(7, 0).to_bit_set(&config).count_ones(), 1);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let config = FilterConfig::new(100, 100).unwrap();
        let hash = Hash::new(i64::MAX, i64::MIN);
        for index in hash.indices(&config) {
            assert!(index < config.number_of_bits());
        }
    }

    #[test]
    fn test_cyclic_pair_reproduces_seeds() {
        let mut function = Murmur128x64Cyclic::new();
        let hash = Hash::from_function(&mut function, b"element");

        let mut seeded = Vec::new();
        seeded.push(function.apply(b"element", 0));
        for seed in 1..4 {
            seeded.push(function.apply(b"element", seed));
        }
        let derived: Vec<i64> = (0..4i64)
            .map(|i| hash.h1().wrapping_add(i.wrapping_mul(hash.h2())))
            .collect();
        assert_eq!(derived, seeded);
    }

    #[test]
    fn test_iterative_pair_uses_seed_one() {
        let mut function = SipHashIterative::new();
        let hash = Hash::from_function(&mut function, b"element");
        assert_eq!(hash.h1(), function.apply(b"element", 0));
        assert_eq!(hash.h2(), function.apply(b"element", 1));
    }
}
