//! # Link Encoding
//!
//! The versioned URL-fragment wire format: how a secret and its version tag
//! become a shareable fragment, and how a fragment becomes them again. The
//! codec owns the version-disambiguation rule; the version enum owns the
//! per-version parameters. Neither does any key derivation — that lives in
//! [`crate::crypto`], and the aggregate in [`crate::identity`] wires the
//! two together.

pub mod codec;
pub mod version;

pub use codec::{decode_fragment, encode_fragment, DecodeError};
pub use version::{InvalidVersion, LinkVersion};
