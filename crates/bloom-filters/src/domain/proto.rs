//! Configuration-independent filter content
//!
//! A `ProtoBloomFilter` is the list of [`Hash`] pairs of every item added,
//! one per item. It can be merged with other protos before any bit-vector
//! size is chosen, then materialized under any [`FilterConfig`].
//!
//! [`FilterConfig`]: super::config::FilterConfig

use std::io::Read;

use super::hash::Hash;
use crate::adapters::Murmur128x64Cyclic;
use crate::error::FilterError;
use crate::ports::{HashFunction, HashFunctionIdentity, IdentityDescriptor};

/// Immutable multiset of item hashes
///
/// Hashes are kept sorted so equality does not depend on insertion order.
/// Duplicates are preserved: each one is a separately added item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ProtoBloomFilter {
    hashes: Vec<Hash>,
    /// Hash function that produced the hashes, when known
    identity: Option<IdentityDescriptor>,
}

impl ProtoBloomFilter {
    /// Wrap hashes computed elsewhere; the result carries no identity
    pub fn from_hashes<I>(hashes: I) -> Self
    where
        I: IntoIterator<Item = Hash>,
    {
        Self::with_identity(hashes.into_iter().collect(), None)
    }

    fn with_identity(mut hashes: Vec<Hash>, identity: Option<IdentityDescriptor>) -> Self {
        hashes.sort_unstable();
        Self { hashes, identity }
    }

    /// Item hashes in canonical order
    pub fn hashes(&self) -> &[Hash] {
        &self.hashes
    }

    /// Number of items folded in, duplicates included
    pub fn item_count(&self) -> usize {
        self.hashes.len()
    }

    /// Hash function that produced this proto, if it was built by a [`Builder`]
    pub fn identity(&self) -> Option<&IdentityDescriptor> {
        self.identity.as_ref()
    }

    /// Union of both operands' hashes (concatenation, duplicates kept)
    ///
    /// # Errors
    /// `HashFunctionMismatch` if both operands name their hash function
    /// and the signatures differ.
    pub fn merge(&self, other: &ProtoBloomFilter) -> Result<ProtoBloomFilter, FilterError> {
        let identity = reconcile(self.identity.as_ref(), other.identity.as_ref())?;
        let mut hashes = Vec::with_capacity(self.hashes.len() + other.hashes.len());
        hashes.extend_from_slice(&self.hashes);
        hashes.extend_from_slice(&other.hashes);
        Ok(Self::with_identity(hashes, identity.cloned()))
    }
}

fn reconcile<'a>(
    left: Option<&'a IdentityDescriptor>,
    right: Option<&'a IdentityDescriptor>,
) -> Result<Option<&'a IdentityDescriptor>, FilterError> {
    match (left, right) {
        (Some(l), Some(r)) if l.signature() != r.signature() => {
            Err(FilterError::HashFunctionMismatch {
                expected: l.to_string(),
                actual: r.to_string(),
            })
        }
        (Some(l), _) => Ok(Some(l)),
        (None, r) => Ok(r),
    }
}

/// Accumulates item hashes for one [`ProtoBloomFilter`]
///
/// Stateful and single-use; owns its hash function, so it is confined to
/// one thread at a time like the function itself.
pub struct Builder<H: HashFunction = Murmur128x64Cyclic> {
    function: H,
    hashes: Vec<Hash>,
}

impl Builder<Murmur128x64Cyclic> {
    /// Builder hashing with MurmurHash3 x64 128
    pub fn new() -> Self {
        Self::with_hash_function(Murmur128x64Cyclic::new())
    }
}

impl Default for Builder<Murmur128x64Cyclic> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HashFunction> Builder<H> {
    pub fn with_hash_function(function: H) -> Self {
        Self {
            function,
            hashes: Vec::new(),
        }
    }

    /// Add one item given as raw bytes
    pub fn update(&mut self, bytes: impl AsRef<[u8]>) -> &mut Self {
        let hash = Hash::from_function(&mut self.function, bytes.as_ref());
        self.hashes.push(hash);
        self
    }

    /// Add one item given as a string, hashed as its UTF-8 bytes
    pub fn update_str(&mut self, item: &str) -> &mut Self {
        self.update(item.as_bytes())
    }

    /// Add one item made of everything remaining in `reader`
    pub fn update_reader<R: Read>(&mut self, mut reader: R) -> Result<&mut Self, FilterError> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(self.update(&buffer))
    }

    /// Add every item of another proto
    ///
    /// # Errors
    /// `HashFunctionMismatch` if `proto` was built with a different hash function.
    pub fn update_proto(&mut self, proto: &ProtoBloomFilter) -> Result<&mut Self, FilterError> {
        let own = IdentityDescriptor::of(&self.function);
        reconcile(Some(&own), proto.identity())?;
        self.hashes.extend_from_slice(proto.hashes());
        Ok(self)
    }

    /// Number of items added so far
    pub fn item_count(&self) -> usize {
        self.hashes.len()
    }

    /// Finish with every accumulated hash
    pub fn build(self) -> ProtoBloomFilter {
        let identity = IdentityDescriptor::of(&self.function);
        ProtoBloomFilter::with_identity(self.hashes, Some(identity))
    }

    /// Shorthand for `update(bytes)` followed by `build()`
    pub fn build_with(mut self, bytes: impl AsRef<[u8]>) -> ProtoBloomFilter {
        self.update(bytes);
        self.build()
    }
}
