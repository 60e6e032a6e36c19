//! Binary hash tree with membership proofs
//!
//! Builds a Merkle tree over an ordered list of byte-like leaves, exposes the root that
//! commits to all of them, and produces compact proofs that a single leaf belongs to
//! the tree. Proofs verify against a root alone; the tree is not needed.
//!
//! # Quick Start
//!
//! ```rust
//! use merkle_core::{verify_proof, MerkleTree};
//!
//! // Build tree
//! let tree = MerkleTree::build(["apple", "banana", "cherry", "date"]).unwrap();
//! let root = tree.root();
//!
//! // Generate proof
//! let proof = tree.proof_for("apple").unwrap();
//!
//! // Verify proof without the tree
//! assert!(verify_proof("apple", &proof, &root));
//! assert!(!verify_proof("apricot", &proof, &root));
//! ```

pub mod digest;
pub mod error;
pub mod proof;
pub mod sha256;
pub mod sha3_256;
pub mod traits;
pub mod tree;

// Re-export commonly used types
pub use digest::{Digest, DIGEST_LEN};
pub use error::{MerkleError, Result};
pub use proof::{verify_proof, verify_proof_with, Position, Proof, ProofStep};
pub use sha256::{hash_leaf, hash_node, Sha256Hasher};
pub use sha3_256::Sha3_256Hasher;
pub use traits::Hasher;
pub use tree::MerkleTree;
