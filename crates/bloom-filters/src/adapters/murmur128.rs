//! MurmurHash3 x64 128-bit, cyclic
//!
//! The 128-bit result is split into two 64-bit halves (r0, r1). Seed 0
//! hashes the buffer; every later call with a non-zero seed advances the
//! cache one step (`r0 += r1`) regardless of the seed's value. A non-zero
//! seed on an empty cache hashes the buffer first.

use std::io::Cursor;

use crate::ports::{compute_signature, HashFunction, HashFunctionIdentity, ProcessType, Signedness};

use super::PROVIDER;

/// Cyclic MurmurHash3 x64 128 hash function
///
/// Not shareable between threads while hashing: the cached halves are
/// scratch state behind `&mut self`.
#[derive(Clone, Debug)]
pub struct Murmur128x64Cyclic {
    /// Cached (r0, r1) of the buffer last hashed with seed 0
    parts: Option<(i64, i64)>,
    signature: i64,
}

impl Murmur128x64Cyclic {
    pub const NAME: &'static str = "Murmur3_x64_128";

    pub fn new() -> Self {
        let mut function = Self {
            parts: None,
            signature: 0,
        };
        function.signature = compute_signature(&mut function);
        // Signature hashing must not leak into the first real buffer
        function.parts = None;
        function
    }

    fn digest(buffer: &[u8]) -> (i64, i64) {
        let mut cursor = Cursor::new(buffer);
        // Reading from an in-memory cursor cannot fail
        let hash = murmur3::murmur3_x64_128(&mut cursor, 0).unwrap_or(0);
        (hash as u64 as i64, (hash >> 64) as u64 as i64)
    }
}

impl Default for Murmur128x64Cyclic {
    fn default() -> Self {
        Self::new()
    }
}

impl HashFunctionIdentity for Murmur128x64Cyclic {
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

impl HashFunction for Murmur128x64Cyclic {
    fn apply(&mut self, buffer: &[u8], seed: u32) -> i64 {
        let (r0, r1) = match self.parts {
            Some((r0, r1)) if seed != 0 => (r0.wrapping_add(r1), r1),
            _ => Self::digest(buffer),
        };
        self.parts = Some((r0, r1));
        r0
    }
}
