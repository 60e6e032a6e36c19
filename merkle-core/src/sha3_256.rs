//! SHA3-256 tree hasher

use sha3::{Digest as _, Sha3_256};

use crate::digest::Digest;
use crate::traits::Hasher;

/// SHA3-256 hasher
///
/// Same node encoding as [`Sha256Hasher`](crate::sha256::Sha256Hasher); only the
/// underlying permutation differs, so roots from the two hashers never agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha3_256Hasher;

impl Hasher for Sha3_256Hasher {
    fn algorithm_name() -> &'static str {
        "sha3-256"
    }

    fn hash(data: &[u8]) -> Digest {
        Digest::new(Sha3_256::digest(data).into())
    }
}
