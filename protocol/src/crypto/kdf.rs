//! # Seed Derivation
//!
//! Turns a link secret into a 32-byte Ed25519 seed. Two policies exist,
//! selected by link version, and both are pure functions: same secret and
//! version in, same seed out, on every platform, forever. That determinism
//! is the entire product — a link is only worth something if it re-derives
//! the exact keypair it was minted with.
//!
//! **Version 0 (hardened)** runs the 12-byte secret through Argon2id with
//! libsodium's interactive cost parameters and an *all-zero* 16-byte salt.
//! The zero salt is deliberate: nothing but the secret travels in the
//! fragment, so the derivation must be reproducible from the secret alone.
//! It is also a documented weakness — with no salt there is no domain
//! separation, and any other system calling Argon2id with the same inputs
//! would collide with our seeds. Do not "fix" this; it is wire format, and
//! changing it strands every v0 link ever issued.
//!
//! **Version 1 (padded)** skips the KDF entirely and pads the 16-byte
//! secret to 32 bytes with ISO/IEC 7816-4 padding (`0x80` marker, zero
//! fill), matching libsodium's `sodium_pad` at block size 32. The original
//! motivation was runtimes where the Argon2 implementation was unreliable;
//! the trade is acceptable only because the v1 secret carries a full 128
//! bits of entropy on its own. Padding is not hashing and must never be
//! swapped for one.

use argon2::{Algorithm, Argon2, Params, Version};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroize;

use crate::config;
use crate::crypto::entropy::Secret;
use crate::link::version::LinkVersion;

/// Errors that can occur during seed derivation.
#[derive(Debug, Error)]
pub enum KdfError {
    /// The secret's length does not match what the version demands.
    #[error("secret has wrong length for version {version}: expected {expected} bytes, got {got}")]
    WrongSecretLength {
        /// The version whose policy was applied.
        version: LinkVersion,
        /// The length that version requires.
        expected: usize,
        /// The length actually supplied.
        got: usize,
    },

    /// The Argon2id computation itself failed (parameter or memory issues).
    #[error("argon2id derivation failed: {0}")]
    Argon2(String),
}

/// A 32-byte Ed25519 signing seed, zeroed on drop.
///
/// Like [`Secret`], this is key-root material: no `Clone`, no `Serialize`,
/// and a `Debug` impl that refuses to print bytes.
pub struct Seed([u8; config::SEED_LENGTH]);

impl Seed {
    /// Borrow the raw seed bytes for keypair expansion.
    pub fn as_bytes(&self) -> &[u8; config::SEED_LENGTH] {
        &self.0
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({} bytes)", self.0.len())
    }
}

/// Derive the signing seed for `secret` under `version`'s policy.
///
/// Pure and deterministic; total over the two defined versions. The secret
/// length is validated against the version before any derivation work.
///
/// # Errors
///
/// [`KdfError::WrongSecretLength`] on a length mismatch, or
/// [`KdfError::Argon2`] if the v0 hardened derivation fails internally.
pub fn derive_seed(secret: &Secret, version: LinkVersion) -> Result<Seed, KdfError> {
    let expected = version.secret_length();
    if secret.len() != expected {
        return Err(KdfError::WrongSecretLength {
            version,
            expected,
            got: secret.len(),
        });
    }

    match version {
        LinkVersion::V0 => derive_hardened(secret.as_bytes()),
        LinkVersion::V1 => Ok(derive_padded(secret.as_bytes())),
    }
}

/// Version-0 policy: Argon2id, interactive cost, all-zero salt.
fn derive_hardened(secret: &[u8]) -> Result<Seed, KdfError> {
    let params = Params::new(
        config::KDF_MEMORY_KIB,
        config::KDF_PASSES,
        config::KDF_LANES,
        Some(config::SEED_LENGTH),
    )
    .map_err(|e| KdfError::Argon2(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    // All zeros. See the module docs before you reach for a real salt.
    let salt = [0u8; config::KDF_SALT_LENGTH];

    let mut seed = [0u8; config::SEED_LENGTH];
    argon2
        .hash_password_into(secret, &salt, &mut seed)
        .map_err(|e| KdfError::Argon2(e.to_string()))?;
    Ok(Seed(seed))
}

/// Version-1 policy: ISO/IEC 7816-4 padding to the seed length.
///
/// Caller has already validated `secret.len() < SEED_LENGTH`, so the
/// marker byte always fits.
fn derive_padded(secret: &[u8]) -> Seed {
    let mut seed = [0u8; config::SEED_LENGTH];
    seed[..secret.len()].copy_from_slice(secret);
    seed[secret.len()] = 0x80;
    Seed(seed)
}
