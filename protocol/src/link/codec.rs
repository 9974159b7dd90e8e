//! # Fragment Codec
//!
//! Serializes a `(version, secret)` pair to a URL fragment and back. This
//! is the wire format of the whole system: the fragment is the only durable
//! copy of the secret, so the rules below are byte-exact and frozen.
//!
//! Encoding:
//!
//! - Version 0: `base58(secret)` — bare, no marker of any kind.
//! - Version 1: `_base58(secret)` — the delimiter, then the encoded secret.
//!
//! Decoding disambiguates on the delimiter alone. `_` never appears in the
//! Base58 alphabet, so a bare fragment is always v0 and a leading delimiter
//! is always v1.
//!
//! One wrinkle is inherited and preserved on purpose: a fragment with a
//! *non-empty* prefix before the delimiter (say `2_abc...`) resolves to
//! version 0 with the prefix ignored. That prefix position is a reserved
//! slot for explicit numeric versions that was never actually parsed, and
//! we do not invent a parse for it here — guessing at semantics for
//! version tags ≥ 2 would mint keys no other implementation agrees on.

use thiserror::Error;

use crate::config;
use crate::crypto::entropy::Secret;
use crate::link::version::LinkVersion;

/// Errors that can occur while decoding a fragment.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The encoded secret contains characters outside the Base58 alphabet,
    /// or is otherwise not decodable.
    #[error("fragment is not valid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    /// The secret decoded cleanly but its length does not match the
    /// resolved version's requirement.
    #[error("decoded secret has wrong length for version {version}: expected {expected} bytes, got {got}")]
    WrongLength {
        /// The version the fragment shape resolved to.
        version: LinkVersion,
        /// The secret length that version requires.
        expected: usize,
        /// The length actually decoded.
        got: usize,
    },
}

/// Encode a `(version, secret)` pair into a fragment string.
///
/// The caller is responsible for the secret having the right length for
/// `version`; encoding itself is infallible and does not validate, because
/// the create path generates the secret from the version's own length.
pub fn encode_fragment(version: LinkVersion, secret: &Secret) -> String {
    let encoded = bs58::encode(secret.as_bytes()).into_string();
    match version {
        LinkVersion::V0 => encoded,
        LinkVersion::V1 => format!("{}{}", config::VERSION_DELIMITER, encoded),
    }
}

/// Decode a fragment string back into its `(version, secret)` pair.
///
/// # Errors
///
/// [`DecodeError::Base58`] for malformed text, [`DecodeError::WrongLength`]
/// when the decoded byte count does not match the resolved version. Never
/// panics on hostile input — every fragment on the internet ends up here.
pub fn decode_fragment(slug: &str) -> Result<(LinkVersion, Secret), DecodeError> {
    let (version, encoded) = resolve_version(slug);

    let bytes = bs58::decode(encoded).into_vec()?;
    let expected = version.secret_length();
    if bytes.len() != expected {
        return Err(DecodeError::WrongLength {
            version,
            expected,
            got: bytes.len(),
        });
    }

    Ok((version, Secret::from_bytes(bytes)))
}

/// Apply the delimiter rule: no delimiter ⇒ v0 over the whole slug; empty
/// prefix ⇒ v1 over the remainder; non-empty prefix ⇒ v0 over the
/// remainder, prefix ignored (the reserved, never-parsed version slot).
///
/// The remainder keeps any later delimiters intact — they fail Base58
/// decoding downstream, which is the correct rejection path.
fn resolve_version(slug: &str) -> (LinkVersion, &str) {
    match slug.split_once(config::VERSION_DELIMITER) {
        None => (LinkVersion::V0, slug),
        Some(("", rest)) => (LinkVersion::V1, rest),
        Some((_prefix, rest)) => (LinkVersion::V0, rest),
    }
}
