//! SHA-256 tree hasher
//!
//! The default hash function for [`MerkleTree`](crate::tree::MerkleTree). Leaf digests
//! are plain `SHA-256(leaf)` with no domain prefix, so a one-leaf tree has
//! `root == SHA-256(leaf)`.

use sha2::{Digest as _, Sha256};

use crate::digest::Digest;
use crate::traits::Hasher;

/// SHA-256 hasher
///
/// # Example
///
/// ```rust
/// use merkle_core::sha256::Sha256Hasher;
/// use merkle_core::traits::Hasher;
///
/// let digest = Sha256Hasher::hash(b"abc");
/// assert_eq!(
///     digest.to_hex(),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn algorithm_name() -> &'static str {
        "sha256"
    }

    fn hash(data: &[u8]) -> Digest {
        Digest::new(Sha256::digest(data).into())
    }
}

/// Hash a leaf with SHA-256
pub fn hash_leaf(data: &[u8]) -> Digest {
    Sha256Hasher::hash_leaf(data)
}

/// Hash two children with SHA-256: `H(hex(left) || hex(right))`
pub fn hash_node(left: &Digest, right: &Digest) -> Digest {
    Sha256Hasher::hash_node(left, right)
}
