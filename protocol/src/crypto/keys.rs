//! # Keypair Expansion
//!
//! Ed25519 keypairs for link identities. Unlike most wallets, there is no
//! "generate a keypair" entry point here — every keypair in this system is
//! expanded deterministically from a [`Seed`], which is itself derived from
//! the secret in a link fragment. The link *is* the key store.
//!
//! ## Security considerations
//!
//! - Seed-to-keypair expansion is RFC 8032 key generation via
//!   `ed25519-dalek`: same seed, same keypair, on every platform.
//! - The signing key is zeroized on drop (thanks, ed25519-dalek).
//! - Key bytes are never logged. If you add logging to this module,
//!   you will be asked to leave.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::config;
use crate::crypto::kdf::Seed;

/// Errors that can occur during key operations.
///
/// Intentionally vague about *why* something failed — leaking details about
/// key material through error messages is a classic footgun.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// A link identity keypair wrapping an Ed25519 signing key.
///
/// Always constructed from a seed, never from fresh randomness: the seed
/// comes out of [`crate::crypto::kdf::derive_seed`], which ties the keypair
/// to the secret in the link fragment. Whoever holds the link holds this key.
///
/// ## Serialization
///
/// `LinkKeypair` intentionally does NOT implement `Serialize`/`Deserialize`.
/// The sanctioned durable representation of the private key is the link
/// itself; any other serialization path is a custody bug waiting to happen.
pub struct LinkKeypair {
    signing_key: SigningKey,
}

/// The public half of a link identity, safe to share with the world.
///
/// This is the on-chain address funds are sent to. Rendered as Base58,
/// the native address encoding of the target ledger.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPublicKey {
    bytes: [u8; config::PUBLIC_KEY_LENGTH],
}

/// An Ed25519 signature over a message.
///
/// 64 bytes, deterministic for a given (key, message) pair. Stored as
/// `Vec<u8>` for serde compatibility, but always exactly 64 bytes when
/// produced by [`LinkKeypair::sign`]; anything else simply fails
/// verification — no panics, just `false`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSignature {
    bytes: Vec<u8>,
}

impl LinkKeypair {
    /// Expand a keypair deterministically from a 32-byte seed.
    ///
    /// The seed is used directly as the Ed25519 secret scalar input, the
    /// standard RFC 8032 expansion. Same seed, same keypair, always.
    pub fn from_seed(seed: &Seed) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed.as_bytes()),
        }
    }

    /// Returns the public key for this keypair.
    pub fn public_key(&self) -> LinkPublicKey {
        LinkPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Raw public key bytes. Safe to share, log, tattoo on your arm, etc.
    pub fn public_key_bytes(&self) -> [u8; config::PUBLIC_KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a message.
    ///
    /// Ed25519 signatures are deterministic — no nonce management, no
    /// randomness needed at signing time, no k-value disasters.
    pub fn sign(&self, message: &[u8]) -> LinkSignature {
        let sig = self.signing_key.sign(message);
        LinkSignature {
            bytes: sig.to_bytes().to_vec(),
        }
    }

    /// Verify a signature against this keypair's own public key.
    pub fn verify(&self, message: &[u8], signature: &LinkSignature) -> bool {
        self.public_key().verify(message, signature)
    }
}

impl Clone for LinkKeypair {
    /// Cloning a keypair is allowed but should make you uncomfortable.
    /// Every copy of a private key is another thing to protect.
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for LinkKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material in debug output. Not even partially.
        write!(f, "LinkKeypair(pub={})", self.public_key().to_base58())
    }
}

impl PartialEq for LinkKeypair {
    /// Public-key equality. Comparing secret material non-constant-time is
    /// a bad habit, and for identity purposes the public key is what counts.
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for LinkKeypair {}

// ---------------------------------------------------------------------------
// LinkPublicKey
// ---------------------------------------------------------------------------

impl LinkPublicKey {
    /// Wrap raw public key bytes without validation.
    pub fn from_bytes(bytes: [u8; config::PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Validate and wrap a byte slice as a public key.
    ///
    /// Rejects wrong lengths and bytes that are not a valid Ed25519 point —
    /// low-order points and other degenerate cases included.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; config::PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; config::PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Verify a signature against this public key.
    ///
    /// Boolean rather than `Result` because callers want a yes/no answer,
    /// not a taxonomy of the ways a forgery can be malformed.
    pub fn verify(&self, message: &[u8], signature: &LinkSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let sig_bytes: [u8; config::SIGNATURE_LENGTH] =
            match signature.bytes.as_slice().try_into() {
                Ok(b) => b,
                Err(_) => return false,
            };
        verifying_key
            .verify(message, &DalekSignature::from_bytes(&sig_bytes))
            .is_ok()
    }

    /// Base58-encoded representation — the address users see.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.bytes).into_string()
    }

    /// Hex-encoded representation, for logs and debugging.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl Hash for LinkPublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Display for LinkPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for LinkPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinkPublicKey({})", self.to_base58())
    }
}

// ---------------------------------------------------------------------------
// LinkSignature
// ---------------------------------------------------------------------------

impl LinkSignature {
    /// Wrap a raw 64-byte signature.
    pub fn from_bytes(bytes: [u8; config::SIGNATURE_LENGTH]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// The raw signature bytes (64 for anything we produced).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex-encoded signature. 128 characters for a valid sig.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Parse a hex-encoded signature.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != config::SIGNATURE_LENGTH {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        Ok(Self { bytes })
    }
}

impl fmt::Display for LinkSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for LinkSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        if hex_str.len() >= 128 {
            write!(f, "LinkSignature({}...{})", &hex_str[..8], &hex_str[120..])
        } else {
            write!(f, "LinkSignature({})", hex_str)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::entropy::Secret;
    use crate::crypto::kdf::derive_seed;
    use crate::link::version::LinkVersion;

    fn seed_from(bytes: [u8; 16]) -> Seed {
        derive_seed(&Secret::from_bytes(bytes.to_vec()), LinkVersion::V1).unwrap()
    }

    #[test]
    fn from_seed_is_deterministic() {
        let kp1 = LinkKeypair::from_seed(&seed_from([42u8; 16]));
        let kp2 = LinkKeypair::from_seed(&seed_from([42u8; 16]));
        assert_eq!(kp1, kp2);
        assert_eq!(kp1.public_key_bytes(), kp2.public_key_bytes());
    }

    #[test]
    fn different_seeds_give_different_keys() {
        let kp1 = LinkKeypair::from_seed(&seed_from([1u8; 16]));
        let kp2 = LinkKeypair::from_seed(&seed_from([2u8; 16]));
        assert_ne!(kp1, kp2);
    }

    #[test]
    fn sign_verify_roundtrip() {
        let kp = LinkKeypair::from_seed(&seed_from([5u8; 16]));
        let msg = b"sweep 5000 lamports";
        let sig = kp.sign(msg);
        assert!(kp.verify(msg, &sig));
        assert!(kp.public_key().verify(msg, &sig));
    }

    #[test]
    fn wrong_message_fails_verification() {
        let kp = LinkKeypair::from_seed(&seed_from([5u8; 16]));
        let sig = kp.sign(b"correct message");
        assert!(!kp.verify(b"wrong message", &sig));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let kp1 = LinkKeypair::from_seed(&seed_from([5u8; 16]));
        let kp2 = LinkKeypair::from_seed(&seed_from([6u8; 16]));
        let sig = kp1.sign(b"message");
        assert!(!kp2.verify(b"message", &sig));
    }

    #[test]
    fn signatures_are_deterministic() {
        let kp = LinkKeypair::from_seed(&seed_from([9u8; 16]));
        let msg = b"determinism is underrated";
        assert_eq!(kp.sign(msg).as_bytes(), kp.sign(msg).as_bytes());
    }

    #[test]
    fn truncated_signature_fails_closed() {
        let kp = LinkKeypair::from_seed(&seed_from([9u8; 16]));
        let sig = LinkSignature { bytes: vec![0u8; 32] };
        assert!(!kp.verify(b"message", &sig));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let kp = LinkKeypair::from_seed(&seed_from([3u8; 16]));
        let rendered = format!("{:?}", kp);
        assert!(rendered.starts_with("LinkKeypair(pub="));
        assert!(!rendered.contains("signing_key"));
    }

    #[test]
    fn public_key_base58_is_address_sized() {
        let kp = LinkKeypair::from_seed(&seed_from([8u8; 16]));
        let addr = kp.public_key().to_base58();
        // 32 bytes of Base58 land between 42 and 44 characters.
        assert!(addr.len() >= 42 && addr.len() <= 46);
    }

    #[test]
    fn try_from_slice_rejects_wrong_length() {
        assert!(LinkPublicKey::try_from_slice(&[0u8; 16]).is_err());
    }

    #[test]
    fn try_from_slice_accepts_real_key() {
        let kp = LinkKeypair::from_seed(&seed_from([4u8; 16]));
        let pk = LinkPublicKey::try_from_slice(&kp.public_key_bytes()).unwrap();
        assert_eq!(pk, kp.public_key());
    }

    #[test]
    fn signature_hex_roundtrip() {
        let kp = LinkKeypair::from_seed(&seed_from([4u8; 16]));
        let sig = kp.sign(b"test");
        let recovered = LinkSignature::from_hex(&sig.to_hex()).unwrap();
        assert_eq!(sig, recovered);
    }

    #[test]
    fn signature_rebuilt_from_raw_bytes_still_verifies() {
        // The path a ledger client takes when signatures arrive as raw
        // 64-byte arrays rather than hex.
        let kp = LinkKeypair::from_seed(&seed_from([4u8; 16]));
        let sig = kp.sign(b"raw bytes");
        let raw: [u8; 64] = sig.as_bytes().try_into().unwrap();
        let rebuilt = LinkSignature::from_bytes(raw);
        assert_eq!(sig, rebuilt);
        assert!(kp.verify(b"raw bytes", &rebuilt));
    }

    #[test]
    fn signature_from_bad_hex_rejected() {
        assert!(LinkSignature::from_hex("deadbeef").is_err());
        assert!(LinkSignature::from_hex("not-hex-at-all").is_err());
    }
}
