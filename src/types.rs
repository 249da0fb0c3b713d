//! Common types for the salted hash engine

use std::{fmt, str::FromStr};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Salt byte string type
///
/// Salts are appended to the hashed input and to the resulting digest.
pub type Salt = Vec<u8>;

/// The kind of digest function used to compute a token
///
/// Defaults to MD5, matching the legacy selector fallback.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[allow(clippy::upper_case_acronyms)]
pub enum AlgorithmType {
    /// MD5 hash function (128 bits)
    #[default]
    MD5,
    /// SHA-1 hash function (160 bits)
    SHA1,
    /// SHA-256 hash function (256 bits)
    SHA256,
    /// SHA-384 hash function (384 bits)
    SHA384,
    /// SHA-512 hash function (512 bits)
    SHA512,
}

impl AlgorithmType {
    /// Every supported algorithm, weakest first
    pub const ALL: [AlgorithmType; 5] = [
        AlgorithmType::MD5,
        AlgorithmType::SHA1,
        AlgorithmType::SHA256,
        AlgorithmType::SHA384,
        AlgorithmType::SHA512,
    ];

    /// Size of the digest in bits
    pub fn digest_size_bits(self) -> usize {
        match self {
            AlgorithmType::MD5 => 128,
            AlgorithmType::SHA1 => 160,
            AlgorithmType::SHA256 => 256,
            AlgorithmType::SHA384 => 384,
            AlgorithmType::SHA512 => 512,
        }
    }

    /// Size of the digest in bytes
    pub fn digest_size_bytes(self) -> usize {
        self.digest_size_bits() / 8
    }

    /// Canonical upper-case name
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmType::MD5 => "MD5",
            AlgorithmType::SHA1 => "SHA1",
            AlgorithmType::SHA256 => "SHA256",
            AlgorithmType::SHA384 => "SHA384",
            AlgorithmType::SHA512 => "SHA512",
        }
    }

    /// Parses an algorithm name, falling back to MD5 for anything unrecognized.
    ///
    /// This mirrors the legacy selector behavior. Prefer [`str::parse`] when an
    /// unknown name should be reported instead.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(name, "unrecognized hash algorithm, falling back to MD5");
            AlgorithmType::MD5
        })
    }
}

impl FromStr for AlgorithmType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        AlgorithmType::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == normalized)
            .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Length range of auto-generated salts, `min` inclusive and `max` exclusive
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SaltSize {
    min: usize,
    max: usize,
}

impl SaltSize {
    /// Smallest auto-generated salt length
    pub const DEFAULT_MIN: usize = 4;
    /// Upper bound (exclusive) of auto-generated salt lengths
    pub const DEFAULT_MAX: usize = 8;

    /// Constructor of a salt size range
    ///
    /// The range must be non-empty and must not allow empty salts.
    pub fn new(min: usize, max: usize) -> Result<Self, Error> {
        if min == 0 || min >= max {
            return Err(Error::InvalidSaltSize { min, max });
        }
        Ok(SaltSize { min, max })
    }

    /// Minimum salt length (inclusive)
    pub fn min(&self) -> usize {
        self.min
    }

    /// Maximum salt length (exclusive)
    pub fn max(&self) -> usize {
        self.max
    }

    /// Whether a salt of `len` bytes could have been generated with this range
    pub fn contains(&self, len: usize) -> bool {
        (self.min..self.max).contains(&len)
    }
}

impl Default for SaltSize {
    fn default() -> Self {
        SaltSize {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}
