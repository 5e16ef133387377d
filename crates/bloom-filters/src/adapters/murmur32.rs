//! MurmurHash3 x86 32-bit, iterative
//!
//! The seed is passed straight to the algorithm, so every seed is a full
//! hash of the buffer.

use std::io::Cursor;

use crate::ports::{compute_signature, HashFunction, HashFunctionIdentity, ProcessType, Signedness};

use super::PROVIDER;

/// Iterative MurmurHash3 x86 32 hash function, sign-extended to 64 bits
#[derive(Clone, Debug)]
pub struct Murmur32x86Iterative {
    signature: i64,
}

impl Murmur32x86Iterative {
    pub const NAME: &'static str = "Murmur3_x86_32";

    pub fn new() -> Self {
        let mut function = Self { signature: 0 };
        function.signature = compute_signature(&mut function);
        function
    }
}

impl Default for Murmur32x86Iterative {
    fn default() -> Self {
        Self::new()
    }
}

impl HashFunctionIdentity for Murmur32x86Iterative {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn signedness(&self) -> Signedness {
        Signedness::Signed
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

impl HashFunction for Murmur32x86Iterative {
    fn apply(&mut self, buffer: &[u8], seed: u32) -> i64 {
        let mut cursor = Cursor::new(buffer);
        // Reading from an in-memory cursor cannot fail
        let hash = murmur3::murmur3_32(&mut cursor, seed).unwrap_or(0);
        i64::from(hash as i32)
    }
}
