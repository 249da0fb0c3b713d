//! Byte source adapter module
//!
//! Converts text and serializable values into the canonical bytes fed to the hash engine.
//! Text is hashed as its UTF-8 encoding. Structured values are encoded by an
//! [`ObjectEncoder`], tagged with the encoder format, and hashed as the base64 text of that
//! tagged encoding.

#[cfg(feature = "serde_support")]
use base64::{engine::general_purpose::STANDARD, Engine};
#[cfg(feature = "serde_support")]
use serde::Serialize;

use crate::error::Error;

/// A value that can be turned into the bytes consumed by the hash engine
pub trait ByteSource {
    /// Canonical bytes of the value
    fn to_hash_bytes(&self) -> Result<Vec<u8>, Error>;
}

impl ByteSource for str {
    fn to_hash_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(self.as_bytes().to_vec())
    }
}

impl ByteSource for String {
    fn to_hash_bytes(&self) -> Result<Vec<u8>, Error> {
        self.as_str().to_hash_bytes()
    }
}

impl ByteSource for [u8] {
    fn to_hash_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(self.to_vec())
    }
}

impl ByteSource for Vec<u8> {
    fn to_hash_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(self.clone())
    }
}

impl<T> ByteSource for &T
where
    T: ByteSource + ?Sized,
{
    fn to_hash_bytes(&self) -> Result<Vec<u8>, Error> {
        (**self).to_hash_bytes()
    }
}

/// An absent value is rejected with [`Error::InvalidInput`]
impl<T> ByteSource for Option<T>
where
    T: ByteSource,
{
    fn to_hash_bytes(&self) -> Result<Vec<u8>, Error> {
        self.as_ref()
            .ok_or(Error::InvalidInput)?
            .to_hash_bytes()
    }
}

/// UTF-8 bytes of a text value
pub fn bytes_of_text(text: Option<&str>) -> Result<Vec<u8>, Error> {
    text.to_hash_bytes()
}

/// Deterministic encoder of structured values
///
/// Encoders hold no mutable state, so a single instance can be shared between threads.
#[cfg(feature = "serde_support")]
pub trait ObjectEncoder: Send + Sync {
    /// Versioned format tag prepended to every encoding
    const FORMAT: &'static str;

    /// Encodes the value into bytes
    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, Error>
    where
        T: Serialize + ?Sized;
}

/// JSON encoder backed by `serde_json`
///
/// Struct fields are written in declaration order. Maps must have string-like keys and
/// should use an ordered map type to stay deterministic.
#[cfg(feature = "serde_support")]
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonEncoder;

#[cfg(feature = "serde_support")]
impl ObjectEncoder for JsonEncoder {
    const FORMAT: &'static str = "json.v1";

    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, Error>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_vec(value).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Compact binary encoder backed by `bincode` with its standard configuration
#[cfg(feature = "bincode_encoding")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeEncoder;

#[cfg(feature = "bincode_encoding")]
impl ObjectEncoder for BincodeEncoder {
    const FORMAT: &'static str = "bincode2.v1";

    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, Error>
    where
        T: Serialize + ?Sized,
    {
        bincode::serde::encode_to_vec(value, bincode::config::standard())
            .map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Canonical hashing bytes of a structured value
///
/// The encoding is prefixed with `FORMAT:` and the result is the UTF-8 of its standard base64
/// representation.
#[cfg(feature = "serde_support")]
pub fn bytes_of_object<T, E>(value: Option<&T>, encoder: &E) -> Result<Vec<u8>, Error>
where
    T: Serialize + ?Sized,
    E: ObjectEncoder,
{
    let value = value.ok_or(Error::InvalidInput)?;
    let encoded = encoder.encode(value)?;

    let mut tagged = Vec::with_capacity(E::FORMAT.len() + 1 + encoded.len());
    tagged.extend_from_slice(E::FORMAT.as_bytes());
    tagged.push(b':');
    tagged.extend_from_slice(&encoded);

    Ok(STANDARD.encode(tagged).into_bytes())
}

/// A structured value paired with the encoder that turns it into hashing bytes
///
/// Lets structured values go through every API that accepts a [`ByteSource`].
#[cfg(feature = "serde_support")]
#[derive(Debug)]
pub struct Encoded<'a, T, E = JsonEncoder>
where
    T: ?Sized,
{
    value: Option<&'a T>,
    encoder: E,
}

#[cfg(feature = "serde_support")]
impl<T, E> Clone for Encoded<'_, T, E>
where
    T: ?Sized,
    E: Clone,
{
    fn clone(&self) -> Self {
        Encoded {
            value: self.value,
            encoder: self.encoder.clone(),
        }
    }
}

#[cfg(feature = "serde_support")]
impl<'a, T> Encoded<'a, T, JsonEncoder>
where
    T: Serialize + ?Sized,
{
    /// Wraps a value using the JSON encoder
    pub fn json(value: Option<&'a T>) -> Self {
        Encoded::with_encoder(value, JsonEncoder)
    }
}

#[cfg(feature = "serde_support")]
impl<'a, T, E> Encoded<'a, T, E>
where
    T: Serialize + ?Sized,
    E: ObjectEncoder,
{
    /// Wraps a value using the given encoder
    pub fn with_encoder(value: Option<&'a T>, encoder: E) -> Self {
        Encoded { value, encoder }
    }
}

#[cfg(feature = "serde_support")]
impl<T, E> ByteSource for Encoded<'_, T, E>
where
    T: Serialize + ?Sized,
    E: ObjectEncoder,
{
    fn to_hash_bytes(&self) -> Result<Vec<u8>, Error> {
        bytes_of_object(self.value, &self.encoder)
    }
}
