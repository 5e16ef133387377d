//! Filter configuration and validation
//!
//! A `FilterConfig` is derived once from the expected item count and the
//! desired false positive rate, then shared by every filter of a family.
//!
//! # Example
//!
//! ```ignore
//! use bloom_filters::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .number_of_items(500)
//!     .probability(1_000)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parameters::{
    false_positive_rate, optimal_number_of_bits, optimal_number_of_hash_functions,
};
use crate::error::FilterError;

/// Largest bit vector a configuration may derive
pub const MAX_BITS: usize = i32::MAX as usize;

/// Default expected item count used by [`FilterConfigBuilder`]
pub const DEFAULT_NUMBER_OF_ITEMS: u32 = 1_000;

/// Default probability (1 in N) used by [`FilterConfigBuilder`]
pub const DEFAULT_PROBABILITY: u32 = 100;

/// Sizing for a family of Bloom filters
///
/// Immutable once constructed: every field is derived and validated in
/// [`FilterConfig::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ConfigParams", into = "ConfigParams")]
pub struct FilterConfig {
    number_of_items: u32,
    probability: u32,
    number_of_bits: usize,
    number_of_hash_functions: usize,
}

/// Serialized form: only the inputs, everything else is re-derived
#[derive(Serialize, Deserialize)]
struct ConfigParams {
    number_of_items: u32,
    probability: u32,
}

impl FilterConfig {
    /// Derive a configuration for `number_of_items` items at a false
    /// positive rate of 1 in `probability`
    ///
    /// # Errors
    /// - `InvalidNumberOfItems` if `number_of_items < 1`
    /// - `InvalidProbability` if `probability < 2`
    /// - `TooManyBits` if the derived size exceeds [`MAX_BITS`]
    pub fn new(number_of_items: u32, probability: u32) -> Result<Self, FilterError> {
        if number_of_items < 1 {
            return Err(FilterError::InvalidNumberOfItems {
                items: number_of_items,
            });
        }
        if probability < 2 {
            return Err(FilterError::InvalidProbability { probability });
        }

        let bits = optimal_number_of_bits(number_of_items, probability);
        if !bits.is_finite() || bits > MAX_BITS as f64 {
            return Err(FilterError::TooManyBits {
                items: number_of_items,
                probability,
            });
        }
        let number_of_bits = bits as usize;
        let number_of_hash_functions =
            optimal_number_of_hash_functions(number_of_bits, number_of_items);

        debug!(
            items = number_of_items,
            probability,
            bits = number_of_bits,
            hash_functions = number_of_hash_functions,
            "Derived filter configuration"
        );

        Ok(Self {
            number_of_items,
            probability,
            number_of_bits,
            number_of_hash_functions,
        })
    }

    /// Expected number of unique items the filter is sized for
    pub fn number_of_items(&self) -> u32 {
        self.number_of_items
    }

    /// Reciprocal of the target false positive rate
    pub fn probability(&self) -> u32 {
        self.probability
    }

    /// Size of the bit vector (m)
    pub fn number_of_bits(&self) -> usize {
        self.number_of_bits
    }

    /// Bytes needed to store the bit vector
    pub fn number_of_bytes(&self) -> usize {
        self.number_of_bits.div_ceil(8)
    }

    /// Number of hash rounds per item (k)
    pub fn number_of_hash_functions(&self) -> usize {
        self.number_of_hash_functions
    }

    /// False positive rate once `number_of_items` items have been added
    pub fn expected_false_positive_rate(&self) -> f64 {
        false_positive_rate(
            self.number_of_bits,
            self.number_of_items,
            self.number_of_hash_functions,
        )
    }
}

impl TryFrom<ConfigParams> for FilterConfig {
    type Error = FilterError;

    fn try_from(params: ConfigParams) -> Result<Self, Self::Error> {
        FilterConfig::new(params.number_of_items, params.probability)
    }
}

impl From<FilterConfig> for ConfigParams {
    fn from(config: FilterConfig) -> Self {
        Self {
            number_of_items: config.number_of_items,
            probability: config.probability,
        }
    }
}

/// Builder for FilterConfig with validation
#[derive(Default)]
pub struct FilterConfigBuilder {
    number_of_items: Option<u32>,
    probability: Option<u32>,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expected number of items
    pub fn number_of_items(mut self, items: u32) -> Self {
        self.number_of_items = Some(items);
        self
    }

    /// Set the false positive rate as 1 in `probability`
    pub fn probability(mut self, probability: u32) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        FilterConfig::new(
            self.number_of_items.unwrap_or(DEFAULT_NUMBER_OF_ITEMS),
            self.probability.unwrap_or(DEFAULT_PROBABILITY),
        )
    }
}
