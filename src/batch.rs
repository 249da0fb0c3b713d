//! Parallel batch operations
//!
//! Every item is hashed independently with its own salt and buffers, so the work is spread
//! over the rayon thread pool without any shared mutable state.

use rayon::prelude::*;

use crate::{error::Error, hasher::SaltedHasher, source::ByteSource};

/// Computes a token for each source, preserving the input order
///
/// Any failing item aborts the whole batch.
pub fn compute_batch<S>(hasher: &SaltedHasher, sources: &[S]) -> Result<Vec<String>, Error>
where
    S: ByteSource + Sync,
{
    sources
        .par_iter()
        .map(|source| hasher.compute(source, None))
        .collect()
}

/// Verifies each `(source, token)` pair, preserving the input order
///
/// Any failing item aborts the whole batch.
pub fn verify_batch<S, K>(hasher: &SaltedHasher, entries: &[(S, K)]) -> Result<Vec<bool>, Error>
where
    S: ByteSource + Sync,
    K: AsRef<str> + Sync,
{
    let results = entries
        .par_iter()
        .map(|(source, token)| hasher.verify(source, token.as_ref()))
        .collect::<Result<Vec<bool>, Error>>()?;

    tracing::debug!(
        algorithm = %hasher.algorithm(),
        total = results.len(),
        matched = results.iter().filter(|m| **m).count(),
        "verified batch"
    );
    Ok(results)
}
