//! # Cryptographic Primitives for HyperLink
//!
//! Everything security-relevant in the link subsystem flows through here:
//! secret generation, seed derivation, and keypair expansion. The pipeline
//! is deliberately small and deliberately boring:
//!
//! - **OS CSPRNG** for fresh secrets — no fallback sources, ever.
//! - **Argon2id** for hardened (v0) seed derivation — libsodium-compatible
//!   parameters, all-zero salt, see [`kdf`] for the full confession.
//! - **ISO 7816-4 padding** for fast (v1) seed derivation.
//! - **Ed25519** for signatures — fast, deterministic, and nobody has
//!   broken it.
//! - **SHA-256** for transfer IDs — because the rest of the world expects it.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. Everything here is a thin, type-safe wrapper around audited
//! implementations. The only thing we own outright is the *policy* — which
//! primitive runs when, with which constants — and that policy is frozen:
//! it is the wire format every issued link depends on.

pub mod entropy;
pub mod hash;
pub mod kdf;
pub mod keys;

// Re-export the things people actually need so they don't have to memorize
// our module hierarchy.
pub use entropy::{EntropyError, Secret};
pub use hash::{double_sha256, sha256_array};
pub use kdf::{derive_seed, KdfError, Seed};
pub use keys::{KeyError, LinkKeypair, LinkPublicKey, LinkSignature};
