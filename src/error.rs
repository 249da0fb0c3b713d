//! Convenience error module

use thiserror::Error;

/// Custom error definitions
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// No value was provided where one is required
    #[error("Input value cannot be absent")]
    InvalidInput,
    /// The value could not be converted to its canonical byte encoding
    #[error("Serialization failed: {0}")]
    Serialization(String),
    /// The token is not valid base64
    #[error("Malformed hash token")]
    MalformedToken,
    /// The algorithm name is not one of the supported digests
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// The salt size range is empty or allows zero-length salts
    #[error("Invalid salt size range [{min}, {max})")]
    InvalidSaltSize {
        /// Requested minimum salt length (inclusive)
        min: usize,
        /// Requested maximum salt length (exclusive)
        max: usize,
    },
}
