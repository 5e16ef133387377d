//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Immutable bit vector
//! - Parameter calculations and configuration
//! - Hash pairs (double hashing)
//! - Proto filters (configuration-independent content)
//! - Standard and counting Bloom filters
//!
//! RULES:
//! - No I/O operations beyond draining a caller's reader
//! - No async code
//! - Pure functions where possible

pub mod bit_set;
pub mod bloom_filter;
pub mod config;
pub mod counting_bloom;
pub mod filter;
pub mod hash;
pub mod parameters;
pub mod proto;

pub use bit_set::BitSet;
pub use bloom_filter::BloomFilter;
pub use config::{FilterConfig, FilterConfigBuilder, MAX_BITS};
pub use counting_bloom::CountingBloomFilter;
pub use filter::Filter;
pub use hash::Hash;
pub use parameters::{false_positive_rate, optimal_number_of_bits, optimal_number_of_hash_functions};
pub use proto::{Builder, ProtoBloomFilter};
