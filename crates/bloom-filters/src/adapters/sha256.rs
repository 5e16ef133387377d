//! SHA-256, cyclic
//!
//! The first 16 bytes of the digest give the two cached halves, read as
//! little-endian 64-bit words.

use sha2::{Digest, Sha256};

use crate::ports::{compute_signature, HashFunction, HashFunctionIdentity, ProcessType, Signedness};

use super::PROVIDER;

/// Cyclic SHA-256 hash function
///
/// Keeps a reusable digest as scratch state; one instance per thread.
#[derive(Clone)]
pub struct Sha256Cyclic {
    digest: Sha256,
    parts: Option<(i64, i64)>,
    signature: i64,
}

impl Sha256Cyclic {
    pub const NAME: &'static str = "SHA-256";

    pub fn new() -> Self {
        let mut function = Self {
            digest: Sha256::new(),
            parts: None,
            signature: 0,
        };
        function.signature = compute_signature(&mut function);
        // Signature hashing must not leak into the first real buffer
        function.parts = None;
        function
    }

    fn hash_parts(&mut self, buffer: &[u8]) -> (i64, i64) {
        self.digest.update(buffer);
        let result = self.digest.finalize_reset();
        let mut r0 = [0u8; 8];
        let mut r1 = [0u8; 8];
        r0.copy_from_slice(&result[..8]);
        r1.copy_from_slice(&result[8..16]);
        (i64::from_le_bytes(r0), i64::from_le_bytes(r1))
    }
}

impl std::fmt::Debug for Sha256Cyclic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256Cyclic")
            .field("parts", &self.parts)
            .field("signature", &self.signature)
            .finish()
    }
}

impl Default for Sha256Cyclic {
    fn default() -> Self {
        Self::new()
    }
}

impl HashFunctionIdentity for Sha256Cyclic {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn signedness(&self) -> Signedness {
        Signedness::Signed
    }

    fn process_type(&self) -> ProcessType {
        ProcessType::Cyclic
    }

    fn provider(&self) -> &str {
        PROVIDER
    }

    fn signature(&self) -> i64 {
        self.signature
    }
}

impl HashFunction for Sha256Cyclic {
    fn apply(&mut self, buffer: &[u8], seed: u32) -> i64 {
        let (r0, r1) = match self.parts {
            Some((r0, r1)) if seed != 0 => (r0.wrapping_add(r1), r1),
            _ => self.hash_parts(buffer),
        };
        self.parts = Some((r0, r1));
        r0
    }
}
