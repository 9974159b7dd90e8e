//! Hashing utilities.
//!
//! SHA-256 only, and only for transaction IDs: the `double_sha256`
//! construction gives sweep transfers a stable identifier computed from
//! their canonical bytes. Nothing in key derivation touches this module —
//! seeds come from the KDF policies in [`crate::crypto::kdf`], full stop.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data as a fixed-size array.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute SHA-256 twice: `SHA256(SHA256(data))`.
///
/// The classic transaction-ID construction. Length-extension resistance is
/// irrelevant for fixed-format inputs, but the doubled form is what every
/// ledger tool expects to recompute.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256_array(&sha256_array(data))
}
