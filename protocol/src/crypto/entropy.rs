//! # Secret Generation
//!
//! Freshly minted link secrets come from exactly one place: the operating
//! system's CSPRNG, through `OsRng`. There is no userspace fallback, no
//! time-seeded PRNG, no "good enough" path. If the OS cannot hand us secure
//! random bytes, secret generation fails loudly and the caller gets an
//! error — a link minted from weak entropy is indistinguishable from a
//! strong one right up until someone else spends the funds.

use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors that can occur while gathering entropy.
#[derive(Debug, Error)]
pub enum EntropyError {
    /// The OS entropy source refused to produce bytes. Unrecoverable for
    /// this call; retrying in a loop will not make `/dev/urandom` appear.
    #[error("secure entropy source unavailable: {0}")]
    SourceUnavailable(String),
}

/// A link secret: the random bytes embedded in a URL fragment, and the sole
/// root of the identity's keypair.
///
/// The buffer is zeroed on drop. That does not make the secret safe — it
/// lives on in the fragment by design — but it keeps dead copies from
/// lingering in freed heap memory.
///
/// `Secret` deliberately implements neither `Clone` nor `Serialize`: every
/// extra copy of key-root material is another thing to leak, and the only
/// sanctioned serialization is the Base58 fragment in [`crate::link`].
pub struct Secret(Zeroizing<Vec<u8>>);

impl Secret {
    /// Generate `length` cryptographically secure random bytes.
    ///
    /// # Errors
    ///
    /// [`EntropyError::SourceUnavailable`] if the OS RNG fails. Never
    /// degrades to a weaker source.
    pub fn generate(length: usize) -> Result<Self, EntropyError> {
        let mut bytes = Zeroizing::new(vec![0u8; length]);
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| EntropyError::SourceUnavailable(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Wrap already-decoded secret bytes (the fragment-parsing path).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Borrow the raw secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the secret in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the secret is empty. An empty secret is never valid for any
    /// link version, but the type does not enforce length — the version
    /// policy in [`crate::crypto::kdf`] does.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret bytes, not even partially. Length only.
        write!(f, "Secret({} bytes)", self.0.len())
    }
}
