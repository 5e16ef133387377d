//! Hash function plugin contract
//!
//! Any hash algorithm can feed a filter as long as it implements
//! [`HashFunction`]. Its [`HashFunctionIdentity`] lets a consumer detect
//! that a filter was produced with a different hash function without
//! comparing code: the signature is the function's own hash of its
//! descriptive string.

use std::fmt;

/// Whether the algorithm's output should be read as signed or unsigned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// How seeded values are produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProcessType {
    /// One real digest per buffer on seed 0, cached as halves (r0, r1).
    /// Each later call with a non-zero seed steps the cache once
    /// (`r0 += r1`), whatever the seed's value; calling seeds 0, 1, 2, ...
    /// in order yields `r0 + k * r1`.
    Cyclic,
    /// The underlying algorithm is run afresh with every seed.
    Iterative,
}

impl fmt::Display for Signedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signedness::Signed => f.write_str("SIGNED"),
            Signedness::Unsigned => f.write_str("UNSIGNED"),
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessType::Cyclic => f.write_str("CYCLIC"),
            ProcessType::Iterative => f.write_str("ITERATIVE"),
        }
    }
}

/// Descriptive metadata of a hash function
pub trait HashFunctionIdentity {
    /// Algorithm name, compared case-insensitively
    fn name(&self) -> &str;

    fn signedness(&self) -> Signedness;

    fn process_type(&self) -> ProcessType;

    /// Who implemented the function
    fn provider(&self) -> &str;

    /// Fingerprint computed once at construction, see [`signature_buffer`]
    fn signature(&self) -> i64;
}

/// A seeded 64-bit hash over a byte buffer
///
/// `apply` takes `&mut self` because implementations may keep scratch
/// state (a reused digest, cached halves). An instance is therefore owned
/// by one thread at a time; give each thread its own instance.
pub trait HashFunction: HashFunctionIdentity {
    /// Hash `buffer` with `seed`
    ///
    /// For a cyclic function seed 0 hashes the buffer and caches the
    /// digest halves; any other seed advances the cached value of the
    /// buffer last hashed with seed 0.
    fn apply(&mut self, buffer: &[u8], seed: u32) -> i64;
}

impl<T: HashFunctionIdentity + ?Sized> HashFunctionIdentity for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn signedness(&self) -> Signedness {
        (**self).signedness()
    }

    fn process_type(&self) -> ProcessType {
        (**self).process_type()
    }

    fn provider(&self) -> &str {
        (**self).provider()
    }

    fn signature(&self) -> i64 {
        (**self).signature()
    }
}

impl<T: HashFunction + ?Sized> HashFunction for Box<T> {
    fn apply(&mut self, buffer: &[u8], seed: u32) -> i64 {
        (**self).apply(buffer, seed)
    }
}

/// Canonical buffer a hash function signs: `"{NAME}-{SIGNEDNESS}-{PROCESS_TYPE}"`
pub fn signature_buffer(identity: &(impl HashFunctionIdentity + ?Sized)) -> Vec<u8> {
    format!(
        "{}-{}-{}",
        identity.name().to_uppercase(),
        identity.signedness(),
        identity.process_type()
    )
    .into_bytes()
}

/// Compute a hash function's signature: `apply(signature_buffer, 0)`
pub fn compute_signature(function: &mut (impl HashFunction + ?Sized)) -> i64 {
    let buffer = signature_buffer(&*function);
    function.apply(&buffer, 0)
}

/// Owned snapshot of a [`HashFunctionIdentity`]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdentityDescriptor {
    name: String,
    signedness: Signedness,
    process_type: ProcessType,
    provider: String,
    signature: i64,
}

impl IdentityDescriptor {
    pub fn of(identity: &(impl HashFunctionIdentity + ?Sized)) -> Self {
        Self {
            name: identity.name().to_string(),
            signedness: identity.signedness(),
            process_type: identity.process_type(),
            provider: identity.provider().to_string(),
            signature: identity.signature(),
        }
    }

    /// Same algorithm description: name (ignoring case), signedness and process type
    pub fn common_eq(&self, other: &(impl HashFunctionIdentity + ?Sized)) -> bool {
        self.name.eq_ignore_ascii_case(other.name())
            && self.signedness == other.signedness()
            && self.process_type == other.process_type()
    }

    /// [`IdentityDescriptor::common_eq`] plus provider and signature
    pub fn deep_eq(&self, other: &(impl HashFunctionIdentity + ?Sized)) -> bool {
        self.common_eq(other)
            && self.provider == other.provider()
            && self.signature == other.signature()
    }
}

impl HashFunctionIdentity for IdentityDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn signedness(&self) -> Signedness {
        self.signedness
    }

    fn process_type(&self) -> ProcessType {
        self.process_type
    }

    fn provider(&self) -> &str {
        &self.provider
    }

    fn signature(&self) -> i64 {
        self.signature
    }
}

impl fmt::Display for IdentityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{} ({}, signature {:#018x})",
            self.name, self.signedness, self.process_type, self.provider, self.signature
        )
    }
}
