/// Unified interface for tree hash functions
use std::fmt::Debug;

use crate::digest::{Digest, DIGEST_HEX_LEN};

/// Hasher trait
///
/// Implementors only supply [`Hasher::hash`]. Internal nodes are always hashed over the
/// concatenated lowercase hex strings of the two children, left first, so that build and
/// verification share one canonical encoding.
pub trait Hasher: Debug + Clone + Send + Sync + 'static {
    /// Algorithm name
    fn algorithm_name() -> &'static str;

    /// Hash raw bytes
    fn hash(data: &[u8]) -> Digest;

    /// Hash a leaf value
    fn hash_leaf(data: &[u8]) -> Digest {
        Self::hash(data)
    }

    /// Hash two children into their parent: `H(hex(left) || hex(right))`
    fn hash_node(left: &Digest, right: &Digest) -> Digest {
        let mut input = String::with_capacity(DIGEST_HEX_LEN * 2);
        input.push_str(&left.to_hex());
        input.push_str(&right.to_hex());
        Self::hash(input.as_bytes())
    }
}
