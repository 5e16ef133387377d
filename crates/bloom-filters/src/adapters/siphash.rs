//! SipHash-2-4, iterative, keyed with `(seed, 0)`

use std::hash::Hasher;

use siphasher::sip::SipHasher24;

use crate::ports::{compute_signature, HashFunction, HashFunctionIdentity, ProcessType, Signedness};

use super::PROVIDER;

/// Iterative SipHash-2-4 hash function
#[derive(Clone, Debug)]
pub struct SipHashIterative {
    signature: i64,
}

impl SipHashIterative {
    pub const NAME: &'static str = "SipHash-2-4";

    pub fn new() -> Self {
        let mut function = Self { signature: 0 };
        function.signature = compute_signature(&mut function);
        function
    }
}

impl Default for SipHashIterative {
    fn default() -> Self {
        Self::new()
    }
}

impl HashFunctionIdentity for SipHashIterative {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn signedness(&self) -> Signedness {
        Signedness::Unsigned
    }

    fn process_type(&self) -> ProcessType {
        ProcessType::Iterative
    }

    fn provider(&self) -> &str {
        PROVIDER
    }

    fn signature(&self) -> i64 {
        self.signature
    }
}

impl HashFunction for SipHashIterative {
    fn apply(&mut self, buffer: &[u8], seed: u32) -> i64 {
        let mut hasher = SipHasher24::new_with_keys(u64::from(seed), 0);
        hasher.write(buffer);
        hasher.finish() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_per_seed() {
        let mut function = SipHashIterative::new();
        assert_eq!(function.apply(b"key", 7), function.apply(b"key", 7));
        assert_ne!(function.apply(b"key", 7), function.apply(b"key", 8));
    }

    #[test]
    fn test_signature_differs_from_other_algorithms() {
        let sip = SipHashIterative::new();
        let murmur = super::super::Murmur32x86Iterative::new();
        assert_ne!(sip.signature(), murmur.signature());
    }
}
