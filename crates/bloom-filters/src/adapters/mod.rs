//! Adapters Layer - concrete hash functions
//!
//! - `Murmur128x64Cyclic`: MurmurHash3 x64 128, cyclic (default)
//! - `Sha256Cyclic`: SHA-256, cyclic
//! - `Murmur32x86Iterative`: MurmurHash3 x86 32, iterative
//! - `SipHashIterative`: SipHash-2-4, iterative

pub mod murmur128;
pub mod murmur32;
pub mod sha256;
pub mod siphash;

pub use murmur128::Murmur128x64Cyclic;
pub use murmur32::Murmur32x86Iterative;
pub use sha256::Sha256Cyclic;
pub use siphash::SipHashIterative;

use crate::error::FilterError;
use crate::ports::HashFunction;

/// Provider reported by every hash function in this crate
pub const PROVIDER: &str = env!("CARGO_PKG_NAME");

/// Look up a hash function by name (case-insensitive)
///
/// # Errors
/// `UnknownHashFunction` if no adapter carries that name.
pub fn hash_function_by_name(name: &str) -> Result<Box<dyn HashFunction + Send>, FilterError> {
    let function: Box<dyn HashFunction + Send> =
        if name.eq_ignore_ascii_case(Murmur128x64Cyclic::NAME) {
            Box::new(Murmur128x64Cyclic::new())
        } else if name.eq_ignore_ascii_case(Sha256Cyclic::NAME) {
            Box::new(Sha256Cyclic::new())
        } else if name.eq_ignore_ascii_case(Murmur32x86Iterative::NAME) {
            Box::new(Murmur32x86Iterative::new())
        } else if name.eq_ignore_ascii_case(SipHashIterative::NAME) {
            Box::new(SipHashIterative::new())
        } else {
            return Err(FilterError::UnknownHashFunction(name.to_string()));
        };
    Ok(function)
}
