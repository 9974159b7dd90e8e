//! Link version tags.
//!
//! A version is fixed at creation and governs three things at once: the
//! secret length, the seed derivation policy, and the fragment shape. Only
//! two versions exist, and they are modeled as a closed enum rather than a
//! trait object on purpose — adding a third version changes length and
//! policy simultaneously, and exhaustive matches make the compiler walk you
//! to every site that needs updating.

use crate::config;
use std::fmt;
use thiserror::Error;

/// A version number outside the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid link version: {0} (supported versions: 0, 1)")]
pub struct InvalidVersion(pub u8);

/// The two defined link versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkVersion {
    /// 12-byte secret, Argon2id-hardened seed derivation, bare fragment.
    V0,
    /// 16-byte secret, padding-only seed derivation, `_`-prefixed fragment.
    V1,
}

impl LinkVersion {
    /// The exact secret length this version requires, in bytes.
    pub fn secret_length(self) -> usize {
        match self {
            LinkVersion::V0 => config::SECRET_LENGTH_V0,
            LinkVersion::V1 => config::SECRET_LENGTH_V1,
        }
    }

    /// The numeric tag as it appears in APIs and documentation.
    pub fn as_u8(self) -> u8 {
        match self {
            LinkVersion::V0 => 0,
            LinkVersion::V1 => 1,
        }
    }
}

impl TryFrom<u8> for LinkVersion {
    type Error = InvalidVersion;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LinkVersion::V0),
            1 => Ok(LinkVersion::V1),
            other => Err(InvalidVersion(other)),
        }
    }
}

impl fmt::Display for LinkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
