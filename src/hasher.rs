//! Salted hash engine module

use base64::{engine::general_purpose::STANDARD, Engine};
use md5::compute as md5_compute;
use rand::{rngs::OsRng, Rng};
#[cfg(feature = "serde_support")]
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

#[cfg(feature = "serde_support")]
use crate::source::{bytes_of_object, JsonEncoder, ObjectEncoder};
use crate::{
    error::Error,
    source::ByteSource,
    types::{AlgorithmType, Salt, SaltSize},
};

/// Salted hash engine
///
/// Produces tokens made of the digest of `input ++ salt` followed by the salt itself, encoded
/// as standard base64. The salt is recovered from the token tail during verification.
///
/// The engine carries no mutable state and can be shared between threads.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SaltedHasher {
    /// Digest function used for every token
    algorithm: AlgorithmType,
    /// Length range of the salts generated when none is provided
    salt_size: SaltSize,
}

impl SaltedHasher {
    /// Constructor of the engine with the default `[4, 8)` salt size
    pub fn new(algorithm: AlgorithmType) -> Self {
        SaltedHasher {
            algorithm,
            salt_size: SaltSize::default(),
        }
    }

    /// Overrides the length range of generated salts
    pub fn with_salt_size(self, salt_size: SaltSize) -> Self {
        SaltedHasher { salt_size, ..self }
    }

    /// Digest function in use
    pub fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    /// Length range of generated salts
    pub fn salt_size(&self) -> SaltSize {
        self.salt_size
    }

    /// Adapter for the digest function selected by the engine
    fn digest(&self, buff: &[u8]) -> Vec<u8> {
        match self.algorithm {
            AlgorithmType::MD5 => md5_compute(buff).to_vec(),
            AlgorithmType::SHA1 => Sha1::digest(buff).to_vec(),
            AlgorithmType::SHA256 => Sha256::digest(buff).to_vec(),
            AlgorithmType::SHA384 => Sha384::digest(buff).to_vec(),
            AlgorithmType::SHA512 => Sha512::digest(buff).to_vec(),
        }
    }

    /// Digest of the input with the salt appended
    fn salted_digest(&self, bytes: &[u8], salt: &[u8]) -> Vec<u8> {
        let mut salted = Vec::with_capacity(bytes.len() + salt.len());
        salted.extend_from_slice(bytes);
        salted.extend_from_slice(salt);
        self.digest(&salted)
    }

    /// Computes the token of a value
    ///
    /// A random salt is generated when `salt` is `None`; a provided salt is used verbatim, empty
    /// salts included.
    pub fn compute<S>(&self, source: &S, salt: Option<&[u8]>) -> Result<String, Error>
    where
        S: ByteSource + ?Sized,
    {
        let bytes = source.to_hash_bytes()?;
        let salt: Salt = match salt {
            Some(salt) => salt.to_vec(),
            None => generate_salt(&self.salt_size),
        };

        let mut token = self.salted_digest(&bytes, &salt);
        token.extend_from_slice(&salt);

        tracing::debug!(
            algorithm = %self.algorithm,
            salt_len = salt.len(),
            "computed salted hash"
        );
        Ok(STANDARD.encode(token))
    }

    /// Checks a value against a token produced by [`SaltedHasher::compute`]
    ///
    /// Returns `Ok(false)` when the token is shorter than the digest or does not match, and
    /// [`Error::MalformedToken`] when it is not valid base64. Digests are compared in constant
    /// time.
    pub fn verify<S>(&self, source: &S, token: &str) -> Result<bool, Error>
    where
        S: ByteSource + ?Sized,
    {
        let bytes = source.to_hash_bytes()?;

        let (digest, salt) = match split_token(self.algorithm, token)? {
            Some(parts) => parts,
            None => {
                tracing::debug!(
                    algorithm = %self.algorithm,
                    "token shorter than digest, verification failed"
                );
                return Ok(false);
            }
        };

        let expected = self.salted_digest(&bytes, &salt);
        let matched: bool = expected.as_slice().ct_eq(digest.as_slice()).into();

        tracing::debug!(algorithm = %self.algorithm, matched, "verified salted hash");
        Ok(matched)
    }

    /// Computes the token of a structured value encoded as JSON
    #[cfg(feature = "serde_support")]
    pub fn compute_object<T>(
        &self,
        value: Option<&T>,
        salt: Option<&[u8]>,
    ) -> Result<String, Error>
    where
        T: Serialize + ?Sized,
    {
        let bytes = bytes_of_object(value, &JsonEncoder)?;
        self.compute(&bytes, salt)
    }

    /// Checks a structured value encoded as JSON against a token
    #[cfg(feature = "serde_support")]
    pub fn verify_object<T>(&self, value: Option<&T>, token: &str) -> Result<bool, Error>
    where
        T: Serialize + ?Sized,
    {
        let bytes = bytes_of_object(value, &JsonEncoder)?;
        self.verify(&bytes, token)
    }
}

/// Generates a random salt with a length drawn uniformly from `size`
///
/// Every byte comes from the OS cryptographically secure generator and is never zero.
pub fn generate_salt(size: &SaltSize) -> Salt {
    let mut rng = OsRng;
    let len = rng.gen_range(size.min()..size.max());
    let salt: Salt = (0..len).map(|_| rng.gen_range(1..=u8::MAX)).collect();

    tracing::trace!(salt_len = salt.len(), "generated salt");
    salt
}

/// Decodes a token and splits it into its digest and salt parts
///
/// Returns `Ok(None)` when the decoded token is shorter than the digest of `algorithm`.
pub fn split_token(
    algorithm: AlgorithmType,
    token: &str,
) -> Result<Option<(Vec<u8>, Salt)>, Error> {
    // canonical encodings only, so the decoded bytes map back to exactly this token
    let mut combined = STANDARD
        .decode(token)
        .map_err(|_| Error::MalformedToken)?;

    let digest_size = algorithm.digest_size_bytes();
    if combined.len() < digest_size {
        return Ok(None);
    }

    let salt = combined.split_off(digest_size);
    Ok(Some((combined, salt)))
}

/// Computes the token of a value with a random salt
pub fn compute_hash<S>(source: &S, algorithm: AlgorithmType) -> Result<String, Error>
where
    S: ByteSource + ?Sized,
{
    SaltedHasher::new(algorithm).compute(source, None)
}

/// Computes the token of a value with the given salt
pub fn compute_hash_with_salt<S>(
    source: &S,
    algorithm: AlgorithmType,
    salt: &[u8],
) -> Result<String, Error>
where
    S: ByteSource + ?Sized,
{
    SaltedHasher::new(algorithm).compute(source, Some(salt))
}

/// Checks a value against a token
pub fn verify_hash<S>(source: &S, algorithm: AlgorithmType, token: &str) -> Result<bool, Error>
where
    S: ByteSource + ?Sized,
{
    SaltedHasher::new(algorithm).verify(source, token)
}

/// Computes the token of a structured value with a random salt
#[cfg(feature = "serde_support")]
pub fn compute_object_hash<T, E>(
    value: Option<&T>,
    algorithm: AlgorithmType,
    encoder: &E,
) -> Result<String, Error>
where
    T: Serialize + ?Sized,
    E: ObjectEncoder,
{
    let bytes = bytes_of_object(value, encoder)?;
    compute_hash(&bytes, algorithm)
}

/// Computes the token of a structured value with the given salt
#[cfg(feature = "serde_support")]
pub fn compute_object_hash_with_salt<T, E>(
    value: Option<&T>,
    algorithm: AlgorithmType,
    salt: &[u8],
    encoder: &E,
) -> Result<String, Error>
where
    T: Serialize + ?Sized,
    E: ObjectEncoder,
{
    let bytes = bytes_of_object(value, encoder)?;
    compute_hash_with_salt(&bytes, algorithm, salt)
}

/// Checks a structured value against a token
#[cfg(feature = "serde_support")]
pub fn verify_object_hash<T, E>(
    value: Option<&T>,
    algorithm: AlgorithmType,
    token: &str,
    encoder: &E,
) -> Result<bool, Error>
where
    T: Serialize + ?Sized,
    E: ObjectEncoder,
{
    let bytes = bytes_of_object(value, encoder)?;
    verify_hash(&bytes, algorithm, token)
}
