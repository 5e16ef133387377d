//! Ports Layer - Trait definitions
//!
//! - `HashFunction`: plugin contract every hash algorithm implements
//! - `HashFunctionIdentity`: metadata and signature protocol

pub mod hash_function;

pub use hash_function::{
    compute_signature, signature_buffer, HashFunction, HashFunctionIdentity, IdentityDescriptor,
    ProcessType, Signedness,
};
