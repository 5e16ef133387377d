//! # Bloom Filters
//!
//! Probabilistic set membership: standard and counting Bloom filters built
//! from pluggable hash functions.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `FilterConfig`: Optimal sizing from item count and 1-in-N probability
//!   - `Hash`: Double-hashing pair that populates bit indices
//!   - `ProtoBloomFilter`/`Builder`: Configuration-independent item hashes
//!   - `BloomFilter`: Immutable bit vector with merge/match/distance
//!   - `CountingBloomFilter`: Per-bit occupancy counts with safe removal
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `HashFunction`: Seeded 64-bit hash plugin contract
//!   - `HashFunctionIdentity`: Name/signedness/process type/signature
//!
//! - **Adapters Layer** (`adapters/`): Hash function implementations
//!   - `Murmur128x64Cyclic`, `Sha256Cyclic`: one digest, cyclic seeds
//!   - `Murmur32x86Iterative`, `SipHashIterative`: seeded per call
//!
//! ## Invariants
//!
//! - **No false negatives**: an item's own filter always matches a filter
//!   built from content that includes it.
//! - **Immutability**: filters never change after construction; merge and
//!   remove return new values.
//! - **Counting**: a bit is set if and only if its count is at least 1.
//!
//! ## Thread Safety
//!
//! Filters and configs are immutable and can be shared freely. Hash
//! functions and builders hold scratch state behind `&mut self`; give each
//! thread its own instance.
//!
//! ## Usage Example
//!
//! ```ignore
//! use bloom_filters::{Builder, BloomFilter, Filter, FilterConfig};
//!
//! let config = FilterConfig::new(100, 1_000)?;
//!
//! let mut builder = Builder::new();
//! builder.update_str("0xABCD").update(b"0x1234");
//! let filter = BloomFilter::from_proto(&builder.build(), &config);
//!
//! let probe = BloomFilter::from_proto(&Builder::new().build_with("0xABCD"), &config);
//! assert!(probe.matches(&filter)?);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use adapters::{
    hash_function_by_name, Murmur128x64Cyclic, Murmur32x86Iterative, Sha256Cyclic,
    SipHashIterative,
};
pub use domain::{
    BitSet, BloomFilter, Builder, CountingBloomFilter, Filter, FilterConfig, FilterConfigBuilder,
    Hash, ProtoBloomFilter,
};
pub use error::FilterError;
pub use ports::{HashFunction, HashFunctionIdentity, IdentityDescriptor, ProcessType, Signedness};
