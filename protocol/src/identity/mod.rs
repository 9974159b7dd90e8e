//! # Link Identities
//!
//! The aggregate the rest of the world talks to: a [`HyperLink`] is a URL
//! and the Ed25519 keypair that URL deterministically re-derives. The URL
//! is the only durable representation — the keypair is a cached view, and
//! `HyperLink::from_link(url)` reconstructs it byte-for-byte from the
//! fragment, every time, on every machine.
//!
//! Construction happens exactly two ways:
//!
//! - [`HyperLink::create`] — fresh random secret, new link.
//! - [`HyperLink::from_url`] / [`HyperLink::from_link`] — existing secret
//!   parsed out of a shared link.
//!
//! Both run the same derivation pipeline (secret → seed → keypair), which
//! is what makes the round-trip property hold. There is no third path and
//! no partial state: every constructor returns a fully valid identity or a
//! typed error.

use std::fmt;

use thiserror::Error;
use url::Url;

use crate::config;
use crate::crypto::entropy::{EntropyError, Secret};
use crate::crypto::kdf::{derive_seed, KdfError};
use crate::crypto::keys::{LinkKeypair, LinkPublicKey};
use crate::link::codec::{decode_fragment, encode_fragment, DecodeError};
use crate::link::version::{InvalidVersion, LinkVersion};

/// Errors that can occur while creating or parsing a link identity.
#[derive(Debug, Error)]
pub enum LinkError {
    /// `create` was called with a version tag outside the supported set.
    #[error(transparent)]
    InvalidVersion(#[from] InvalidVersion),

    /// The link text is not a parseable URL.
    #[error("link text is not a valid URL: {0}")]
    MalformedUrl(String),

    /// The URL parsed but carries no `#fragment` to decode.
    #[error("link has no fragment after '#'")]
    MissingFragment,

    /// The fragment failed to decode into a `(version, secret)` pair.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Secret generation failed — no secure entropy available.
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    /// Seed derivation failed.
    #[error(transparent)]
    Kdf(#[from] KdfError),
}

/// A value-bearing, link-recoverable identity.
///
/// Immutable once constructed. There is no destructor and nothing to
/// revoke: the secret lives in the URL, so the link recovers this keypair
/// forever. "Retiring" a link means sweeping its funds to a successor via
/// [`crate::rotation`] — the old link still derives its keypair, it just
/// no longer controls anything worth taking.
pub struct HyperLink {
    url: Url,
    keypair: LinkKeypair,
}

impl HyperLink {
    /// Create a fresh identity under the given version tag.
    ///
    /// Generates a new random secret of the version's length, derives the
    /// keypair, and assembles the full link as
    /// `{origin}{path}#{fragment}`. The origin comes from
    /// [`config::hyperlink_origin`] and affects only how the link reads,
    /// never what it derives.
    ///
    /// # Errors
    ///
    /// [`LinkError::InvalidVersion`] for tags outside `{0, 1}`,
    /// [`LinkError::Entropy`] if the OS RNG fails.
    pub fn create(version: u8) -> Result<Self, LinkError> {
        let version = LinkVersion::try_from(version)?;
        let secret = Secret::generate(version.secret_length())?;
        let seed = derive_seed(&secret, version)?;
        let keypair = LinkKeypair::from_seed(&seed);

        let fragment = encode_fragment(version, &secret);
        let url_string = format!(
            "{}{}#{}",
            config::hyperlink_origin(),
            config::HYPERLINK_PATH,
            fragment
        );
        let url = Url::parse(&url_string).map_err(|e| LinkError::MalformedUrl(e.to_string()))?;

        tracing::debug!(%version, public_key = %keypair.public_key(), "created link identity");
        Ok(Self { url, keypair })
    }

    /// Reconstruct the identity a URL encodes.
    ///
    /// Runs the fragment through the codec and the same derivation pipeline
    /// `create` uses, guaranteeing `from_url(create(v).url())` yields an
    /// identical keypair.
    pub fn from_url(url: Url) -> Result<Self, LinkError> {
        let slug = url.fragment().ok_or(LinkError::MissingFragment)?;
        let (version, secret) = decode_fragment(slug)?;
        let seed = derive_seed(&secret, version)?;
        let keypair = LinkKeypair::from_seed(&seed);

        tracing::debug!(%version, public_key = %keypair.public_key(), "parsed link identity");
        Ok(Self { url, keypair })
    }

    /// Parse link text into a URL and reconstruct its identity.
    pub fn from_link(link: &str) -> Result<Self, LinkError> {
        let url = Url::parse(link).map_err(|e| LinkError::MalformedUrl(e.to_string()))?;
        Self::from_url(url)
    }

    /// The full shareable URL. Treat its string form as the private key it
    /// effectively is: whoever can read it can spend.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The identity's keypair, for balance queries and signing sweeps.
    pub fn keypair(&self) -> &LinkKeypair {
        &self.keypair
    }

    /// Shorthand for the keypair's public key — the on-chain address.
    pub fn public_key(&self) -> LinkPublicKey {
        self.keypair.public_key()
    }
}

impl fmt::Debug for HyperLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The URL contains the secret. Debug output gets the public key only.
        write!(f, "HyperLink(pub={})", self.public_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_unknown_versions() {
        for v in [2u8, 9, 255] {
            assert!(matches!(
                HyperLink::create(v).unwrap_err(),
                LinkError::InvalidVersion(InvalidVersion(got)) if got == v
            ));
        }
    }

    #[test]
    fn created_v1_link_has_expected_shape() {
        let link = HyperLink::create(1).unwrap();
        let url = link.url();
        assert_eq!(url.path(), config::HYPERLINK_PATH);
        let fragment = url.fragment().unwrap();
        assert!(fragment.starts_with(config::VERSION_DELIMITER));
    }

    #[test]
    fn created_v0_link_has_bare_fragment() {
        let link = HyperLink::create(0).unwrap();
        let fragment = link.url().fragment().unwrap();
        assert!(!fragment.contains(config::VERSION_DELIMITER));
    }

    #[test]
    fn v1_round_trips_through_link_text() {
        let original = HyperLink::create(1).unwrap();
        let recovered = HyperLink::from_link(original.url().as_str()).unwrap();
        assert_eq!(original.keypair(), recovered.keypair());
    }

    #[test]
    fn v0_round_trips_through_link_text() {
        let original = HyperLink::create(0).unwrap();
        let recovered = HyperLink::from_link(original.url().as_str()).unwrap();
        assert_eq!(original.keypair(), recovered.keypair());
    }

    #[test]
    fn two_created_links_are_distinct_identities() {
        let a = HyperLink::create(1).unwrap();
        let b = HyperLink::create(1).unwrap();
        assert_ne!(a.keypair(), b.keypair());
        assert_ne!(a.url().as_str(), b.url().as_str());
    }

    #[test]
    fn from_link_rejects_non_url_text() {
        assert!(matches!(
            HyperLink::from_link("not a url at all").unwrap_err(),
            LinkError::MalformedUrl(_)
        ));
    }

    #[test]
    fn from_link_rejects_missing_fragment() {
        assert!(matches!(
            HyperLink::from_link("http://localhost:3000/i").unwrap_err(),
            LinkError::MissingFragment
        ));
    }

    #[test]
    fn from_link_rejects_garbage_fragment() {
        assert!(matches!(
            HyperLink::from_link("http://localhost:3000/i#O0O0O0").unwrap_err(),
            LinkError::Decode(DecodeError::Base58(_))
        ));
    }

    #[test]
    fn origin_does_not_affect_derivation() {
        // Same fragment behind a different host and scheme re-derives the
        // same keypair; the origin is presentation, not key material.
        let original = HyperLink::create(1).unwrap();
        let fragment = original.url().fragment().unwrap().to_string();
        let moved = HyperLink::from_link(&format!("https://hyperlink.sh/i#{fragment}")).unwrap();
        assert_eq!(original.keypair(), moved.keypair());
    }

    #[test]
    fn debug_hides_the_url() {
        let link = HyperLink::create(1).unwrap();
        let rendered = format!("{:?}", link);
        assert!(!rendered.contains(link.url().fragment().unwrap()));
        assert!(rendered.contains(&link.public_key().to_base58()));
    }
}
