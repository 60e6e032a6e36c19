//! Membership proofs
//!
//! # Verification algorithm
//!
//! 1. Hash the leaf: `current = H(leaf)`
//! 2. Walk the steps in order:
//!    - sibling on the left: `current = H(sibling || current)`
//!    - sibling on the right: `current = H(current || sibling)`
//! 3. Compare `current` with the claimed root
//!
//! A node that was the unpaired last entry of an odd-length level is recorded as its own
//! right-hand sibling, so the verifier recomputes the builder's `H(node || node)`. Every
//! proof therefore has exactly one step per combining level.
//!
//! Verification never needs the tree. Malformed proof documents (unknown position tag,
//! digest that is not 64 hex characters) are rejected when decoded, so every [`Proof`]
//! value is well-formed and [`Proof::verify`] only ever answers `true` or `false`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::digest::Digest;
use crate::error::{MerkleError, Result};
use crate::sha256::Sha256Hasher;
use crate::traits::Hasher;

/// Side on which a sibling sits relative to the node being climbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Right => "right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Position::Left),
            "right" => Ok(Position::Right),
            other => Err(MerkleError::MalformedProof(format!(
                "unknown position tag: {:?}",
                other
            ))),
        }
    }
}

/// One sibling on the path from a leaf to the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProofStep {
    /// Sibling digest
    pub data: Digest,

    /// Sibling side
    pub position: Position,
}

impl ProofStep {
    pub fn new(data: Digest, position: Position) -> Self {
        Self { data, position }
    }

    /// Fold this step into the running digest
    pub fn apply<H: Hasher>(&self, current: &Digest) -> Digest {
        match self.position {
            Position::Left => H::hash_node(&self.data, current),
            Position::Right => H::hash_node(current, &self.data),
        }
    }
}

/// Membership proof
///
/// Serialises as a JSON array of `{ "data": "<hex>", "position": "left" | "right" }`.
///
/// # Example
///
/// ```rust
/// use merkle_core::{verify_proof, MerkleTree};
///
/// let tree = MerkleTree::build(["apple", "banana", "cherry", "date"]).unwrap();
/// let proof = tree.proof_for("apple").unwrap();
///
/// assert_eq!(proof.len(), 2);
/// assert!(verify_proof("apple", &proof, &tree.root()));
/// assert!(!verify_proof("apples", &proof, &tree.root()));
///
/// let json = proof.to_json().unwrap();
/// let restored = merkle_core::Proof::from_json(&json).unwrap();
/// assert_eq!(restored, proof);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof {
    steps: Vec<ProofStep>,
}

impl Proof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<ProofStep> {
        self.steps
    }

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProofStep> {
        self.steps.iter()
    }

    /// Root reconstructed from `leaf` with hasher `H`
    pub fn compute_root<H: Hasher>(&self, leaf: &[u8]) -> Digest {
        let mut current = H::hash_leaf(leaf);

        for (height, step) in self.steps.iter().enumerate() {
            current = step.apply::<H>(&current);
            trace!("step {}: sibling on {} -> {}", height, step.position, current);
        }

        current
    }

    /// Verify with SHA-256
    pub fn verify<T: AsRef<[u8]>>(&self, leaf: T, root: &Digest) -> bool {
        self.verify_with::<Sha256Hasher, T>(leaf, root)
    }

    /// Verify with hasher `H`
    pub fn verify_with<H: Hasher, T: AsRef<[u8]>>(&self, leaf: T, root: &Digest) -> bool {
        &self.compute_root::<H>(leaf.as_ref()) == root
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| MerkleError::Serialization(format!("Failed to serialize proof: {}", e)))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MerkleError::Serialization(format!("Failed to serialize proof: {}", e)))
    }

    /// Decode a proof document
    ///
    /// # Errors
    /// - unknown position tag, missing field, or bad digest: `MalformedProof`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MerkleError::MalformedProof(e.to_string()))
    }
}

impl From<Vec<ProofStep>> for Proof {
    fn from(steps: Vec<ProofStep>) -> Self {
        Self::new(steps)
    }
}

impl FromIterator<ProofStep> for Proof {
    fn from_iter<I: IntoIterator<Item = ProofStep>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Proof {
    type Item = ProofStep;
    type IntoIter = std::vec::IntoIter<ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = &'a ProofStep;
    type IntoIter = std::slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Verify a SHA-256 membership proof against a claimed root
///
/// Depends only on its three inputs; no tree is needed.
pub fn verify_proof<T: AsRef<[u8]>>(leaf: T, proof: &Proof, root: &Digest) -> bool {
    proof.verify(leaf, root)
}

/// Verify a membership proof with hasher `H`
pub fn verify_proof_with<H: Hasher, T: AsRef<[u8]>>(leaf: T, proof: &Proof, root: &Digest) -> bool {
    proof.verify_with::<H, T>(leaf, root)
}
