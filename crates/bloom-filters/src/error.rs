//! Error types for the Bloom filter crate

use thiserror::Error;

/// Errors that can occur while configuring, building or combining filters
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid number of items: {items} (must be at least 1)")]
    InvalidNumberOfItems { items: u32 },

    #[error("Invalid probability: 1 in {probability} (must be at least 2)")]
    InvalidProbability { probability: u32 },

    #[error("Filter for {items} items at 1 in {probability} needs more than {max} bits", max = i32::MAX)]
    TooManyBits { items: u32, probability: u32 },

    #[error("Unknown hash function: {0}")]
    UnknownHashFunction(String),

    #[error("Hash function mismatch: expected {expected}, got {actual}")]
    HashFunctionMismatch { expected: String, actual: String },

    #[error("Filter size mismatch: {expected} bits vs {actual} bits")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Bit index {index} out of range for {len} bits")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bincode::Error> for FilterError {
    fn from(err: bincode::Error) -> Self {
        FilterError::Serialization(err.to_string())
    }
}
