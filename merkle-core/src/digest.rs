//! Fixed-size digest values
//!
//! A [`Digest`] holds the 32 raw bytes produced by a [`Hasher`](crate::traits::Hasher).
//! Its canonical external form is a 64 character lowercase hex string: that form is
//! what `Display`, `FromStr` and serde use, and it is also the form concatenated when
//! two children are hashed into their parent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MerkleError, Result};

/// Digest length in bytes
pub const DIGEST_LEN: usize = 32;

/// Digest length in hex characters
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// 256-bit hash output
///
/// # Example
///
/// ```rust
/// use merkle_core::{hash_leaf, Digest};
///
/// let digest = hash_leaf(b"abc");
/// let hex = digest.to_hex();
/// assert_eq!(hex.len(), 64);
///
/// let parsed: Digest = hex.parse().unwrap();
/// assert_eq!(parsed, digest);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64 character hex string
    ///
    /// Any other length, or a non-hex character, is rejected rather than padded or
    /// truncated.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != DIGEST_HEX_LEN {
            return Err(MerkleError::InvalidDigest(format!(
                "expected {} hex characters, got {}",
                DIGEST_HEX_LEN,
                s.len()
            )));
        }

        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| MerkleError::InvalidDigest(format!("{}: {}", s, e)))?;

        Ok(Self(bytes))
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
