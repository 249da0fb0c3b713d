//! Salted one-way hashing of text and structured values.
//!
//! A token is the base64 encoding of `digest(input ++ salt) ++ salt`. The salt is either
//! provided by the caller or generated at random (4 to 7 non-zero bytes), and is recovered from
//! the token tail when a value is verified.
//!
//! ```
//! use saltyhash::{compute_hash, verify_hash, AlgorithmType};
//!
//! let token = compute_hash("hello", AlgorithmType::SHA256).unwrap();
//! assert!(verify_hash("hello", AlgorithmType::SHA256, &token).unwrap());
//! assert!(!verify_hash("HELLO", AlgorithmType::SHA256, &token).unwrap());
//! ```
//!
//! This is not a password storage scheme: digests are computed in a single pass with no
//! work factor.

#![deny(
// Harden built-in lints
missing_copy_implementations,
missing_debug_implementations,
missing_docs,
unreachable_pub,

// Harden clippy lints
clippy::all,
)]

#[cfg(feature = "bincode_encoding")]
pub use source::BincodeEncoder;
#[cfg(feature = "serde_support")]
pub use {
    hasher::{compute_object_hash, compute_object_hash_with_salt, verify_object_hash},
    source::{bytes_of_object, Encoded, JsonEncoder, ObjectEncoder},
};
pub use {
    batch::{compute_batch, verify_batch},
    error::Error,
    hasher::{
        compute_hash, compute_hash_with_salt, generate_salt, split_token, verify_hash,
        SaltedHasher,
    },
    source::{bytes_of_text, ByteSource},
    types::{AlgorithmType, Salt, SaltSize},
};

pub mod batch;
pub mod error;
pub mod hasher;
pub mod source;
pub mod types;
