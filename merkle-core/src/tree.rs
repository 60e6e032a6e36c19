//! Merkle tree construction and proof generation
//!
//! # Shape
//!
//! ```text
//!              root
//!            /      \
//!        H(ab)      H(cc)        <- "c" is unpaired, so it is paired with itself
//!        /   \      /
//!      a      b    c
//! ```
//!
//! - level 0 holds the leaf digests in input order
//! - each next level has `ceil(len / 2)` entries
//! - an odd trailing node is hashed with itself, never skipped or zero-padded
//! - the last level holds exactly one digest, the root
//!
//! The tree is immutable after [`MerkleTree::build`]; every query is read-only and a
//! built tree can be shared across threads by reference.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::digest::Digest;
use crate::error::{MerkleError, Result};
use crate::proof::{Position, Proof, ProofStep};
use crate::sha256::Sha256Hasher;
use crate::traits::Hasher;

/// Binary hash tree over an ordered list of leaves
///
/// # Example
///
/// ```rust
/// use merkle_core::{hash_leaf, MerkleTree};
///
/// let tree = MerkleTree::build(["x"]).unwrap();
/// assert_eq!(tree.root(), hash_leaf(b"x"));
/// assert_eq!(tree.depth(), 0);
/// ```
pub struct MerkleTree<H = Sha256Hasher> {
    /// Leaf bytes in input order
    leaves: Vec<Vec<u8>>,

    /// levels[0] = leaf digests, levels[n-1] = [root]
    levels: Vec<Vec<Digest>>,

    root: Digest,

    _hasher: PhantomData<fn() -> H>,
}

impl MerkleTree<Sha256Hasher> {
    /// Build a SHA-256 tree
    ///
    /// # Errors
    /// - `EmptyInput` when `leaves` yields nothing
    pub fn build<I, T>(leaves: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        Self::from_leaves(leaves)
    }
}

impl<H: Hasher> MerkleTree<H> {
    /// Build a tree with hasher `H`
    ///
    /// ```rust
    /// use merkle_core::sha3_256::Sha3_256Hasher;
    /// use merkle_core::MerkleTree;
    ///
    /// let tree = MerkleTree::<Sha3_256Hasher>::from_leaves(["a", "b", "c"]).unwrap();
    /// let proof = tree.proof(2).unwrap();
    /// assert!(proof.verify_with::<Sha3_256Hasher, _>("c", &tree.root()));
    /// ```
    pub fn from_leaves<I, T>(leaves: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let leaves: Vec<Vec<u8>> = leaves
            .into_iter()
            .map(|leaf| leaf.as_ref().to_vec())
            .collect();

        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let leaf_hashes: Vec<Digest> = leaves.iter().map(|leaf| H::hash_leaf(leaf)).collect();
        let levels = build_levels::<H>(leaf_hashes);

        // build_levels stops at a level of exactly one entry
        let root = levels[levels.len() - 1][0];

        debug!(
            "Merkle tree built ({}): {} leaves, {} levels, root: {}",
            H::algorithm_name(),
            leaves.len(),
            levels.len(),
            root
        );

        Ok(Self {
            leaves,
            levels,
            root,
            _hasher: PhantomData,
        })
    }

    pub fn root(&self) -> Digest {
        self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of combining levels above the leaves
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn leaves(&self) -> &[Vec<u8>] {
        &self.leaves
    }

    pub fn leaf(&self, index: usize) -> Option<&[u8]> {
        self.leaves.get(index).map(Vec::as_slice)
    }

    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    pub fn level(&self, height: usize) -> Option<&[Digest]> {
        self.levels.get(height).map(Vec::as_slice)
    }

    pub fn leaf_hashes(&self) -> &[Digest] {
        &self.levels[0]
    }

    /// First position whose bytes equal `leaf`
    pub fn index_of<T: AsRef<[u8]>>(&self, leaf: T) -> Option<usize> {
        let needle = leaf.as_ref();
        self.leaves.iter().position(|candidate| candidate.as_slice() == needle)
    }

    /// Proof for the leaf at `index`
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= leaf_count()`
    pub fn proof(&self, index: usize) -> Result<Proof> {
        if index >= self.leaf_count() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                total: self.leaf_count(),
            });
        }

        let mut steps = Vec::with_capacity(self.depth());
        let mut current = index;

        for level in &self.levels[..self.levels.len() - 1] {
            let is_left = current % 2 == 0;
            let sibling = if is_left { current + 1 } else { current - 1 };

            // unpaired trailing node was hashed with itself, so it is its own sibling
            let data = level.get(sibling).unwrap_or(&level[current]);
            let position = if is_left { Position::Right } else { Position::Left };
            steps.push(ProofStep::new(*data, position));

            current /= 2;
        }

        Ok(Proof::new(steps))
    }

    /// Proof for the first leaf equal to `leaf`
    ///
    /// With duplicate leaves only the first occurrence is reachable here; use
    /// [`MerkleTree::proof`] to address a later one.
    ///
    /// # Errors
    /// - `LeafNotFound` when no leaf matches
    pub fn proof_for<T: AsRef<[u8]>>(&self, leaf: T) -> Result<Proof> {
        let index = self.index_of(leaf).ok_or(MerkleError::LeafNotFound)?;
        self.proof(index)
    }

    /// Verify `proof` for `leaf` against this tree's root
    pub fn verify<T: AsRef<[u8]>>(&self, leaf: T, proof: &Proof) -> bool {
        proof.verify_with::<H, T>(leaf, &self.root)
    }
}

/// Combine levels bottom-up until one digest remains
fn build_levels<H: Hasher>(leaf_hashes: Vec<Digest>) -> Vec<Vec<Digest>> {
    let mut levels = vec![leaf_hashes];

    while levels[levels.len() - 1].len() > 1 {
        let next: Vec<Digest> = levels[levels.len() - 1]
            .chunks(2)
            .map(|pair| {
                let left = &pair[0];
                let right = pair.get(1).unwrap_or(left);
                H::hash_node(left, right)
            })
            .collect();

        levels.push(next);
    }

    levels
}

impl<H> Clone for MerkleTree<H> {
    fn clone(&self) -> Self {
        Self {
            leaves: self.leaves.clone(),
            levels: self.levels.clone(),
            root: self.root,
            _hasher: PhantomData,
        }
    }
}

impl<H: Hasher> fmt::Debug for MerkleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleTree")
            .field("algorithm", &H::algorithm_name())
            .field("leaf_count", &self.leaves.len())
            .field("depth", &(self.levels.len() - 1))
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sha256::{hash_leaf, hash_node};

    fn fruit() -> Vec<&'static str> {
        vec!["apple", "banana", "cherry", "date"]
    }

    #[test]
    fn test_empty_input_fails() {
        let result = MerkleTree::build(Vec::<&str>::new());
        assert_eq!(result.unwrap_err(), MerkleError::EmptyInput);
    }

    #[test]
    fn test_single_leaf_root_is_leaf_hash() {
        let tree = MerkleTree::build(["x"]).unwrap();

        assert_eq!(tree.root(), hash_leaf(b"x"));
        assert_eq!(tree.levels().len(), 1);

        let proof = tree.proof(0).unwrap();
        assert!(proof.is_empty());
        assert!(tree.verify("x", &proof));
    }

    #[test]
    fn test_four_leaf_layout() {
        //       root
        //      /    \
        //   node01  node23
        //   /  \    /  \
        //  L0  L1  L2  L3
        let tree = MerkleTree::build(fruit()).unwrap();
        let l: Vec<Digest> = fruit().iter().map(|s| hash_leaf(s.as_bytes())).collect();

        let node01 = hash_node(&l[0], &l[1]);
        let node23 = hash_node(&l[2], &l[3]);

        assert_eq!(tree.level(0).unwrap(), l.as_slice());
        assert_eq!(tree.level(1).unwrap(), &[node01, node23]);
        assert_eq!(tree.root(), hash_node(&node01, &node23));
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_odd_level_pairs_with_itself() {
        let tree = MerkleTree::build(["apple", "banana", "cherry"]).unwrap();
        let a = hash_leaf(b"apple");
        let b = hash_leaf(b"banana");
        let c = hash_leaf(b"cherry");

        let ab = hash_node(&a, &b);
        let cc = hash_node(&c, &c);

        assert_eq!(tree.level(1).unwrap(), &[ab, cc]);
        assert_eq!(tree.root(), hash_node(&ab, &cc));
    }

    #[test]
    fn test_level_sizes_halve_rounding_up() {
        let leaves: Vec<String> = (0..11).map(|i| format!("leaf{}", i)).collect();
        let tree = MerkleTree::build(&leaves).unwrap();

        let sizes: Vec<usize> = tree.levels().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![11, 6, 3, 2, 1]);
    }

    #[test]
    fn test_apple_proof_has_two_steps() {
        let tree = MerkleTree::build(fruit()).unwrap();
        let proof = tree.proof_for("apple").unwrap();

        assert_eq!(proof.len(), 2);
        assert_eq!(proof.steps()[0].position, Position::Right);
        assert_eq!(proof.steps()[0].data, hash_leaf(b"banana"));
        assert_eq!(proof.steps()[1].position, Position::Right);
        assert!(tree.verify("apple", &proof));
        assert!(!tree.verify("applf", &proof));
    }

    #[test]
    fn test_unpaired_leaf_is_its_own_sibling() {
        let tree = MerkleTree::build(["apple", "banana", "cherry"]).unwrap();
        let proof = tree.proof_for("cherry").unwrap();

        // level 0: cherry pairs with itself, level 1: H(apple, banana) on the left
        assert_eq!(proof.len(), 2);
        assert_eq!(proof.steps()[0], ProofStep::new(hash_leaf(b"cherry"), Position::Right));
        assert_eq!(
            proof.steps()[1],
            ProofStep::new(hash_node(&hash_leaf(b"apple"), &hash_leaf(b"banana")), Position::Left)
        );
        assert!(tree.verify("cherry", &proof));
    }

    #[test]
    fn test_proof_length_equals_depth() {
        for n in 1..=17 {
            let leaves: Vec<String> = (0..n).map(|i| format!("item-{}", i)).collect();
            let tree = MerkleTree::build(&leaves).unwrap();

            for index in 0..n {
                assert_eq!(tree.proof(index).unwrap().len(), tree.depth(), "n={} index={}", n, index);
            }
        }
    }

    #[test]
    fn test_every_index_round_trips() {
        for n in 1..=17 {
            let leaves: Vec<String> = (0..n).map(|i| format!("item-{}", i)).collect();
            let tree = MerkleTree::build(&leaves).unwrap();

            for (index, leaf) in leaves.iter().enumerate() {
                let proof = tree.proof(index).unwrap();
                assert!(tree.verify(leaf, &proof), "n={} index={}", n, index);
            }
        }
    }

    #[test]
    fn test_leaf_not_found() {
        let tree = MerkleTree::build(fruit()).unwrap();

        for absent in ["fig", "", "Apple", "apple "] {
            assert_eq!(tree.proof_for(absent).unwrap_err(), MerkleError::LeafNotFound);
        }
    }

    #[test]
    fn test_invalid_index() {
        let tree = MerkleTree::build(fruit()).unwrap();

        match tree.proof(999) {
            Err(MerkleError::IndexOutOfRange { index, total }) => {
                assert_eq!(index, 999);
                assert_eq!(total, 4);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_leaves_first_match() {
        let tree = MerkleTree::build(["a", "b", "a", "c"]).unwrap();

        assert_eq!(tree.index_of("a"), Some(0));
        assert_eq!(tree.proof_for("a").unwrap(), tree.proof(0).unwrap());
        assert_ne!(tree.proof(2).unwrap(), tree.proof(0).unwrap());
        assert!(tree.verify("a", &tree.proof(2).unwrap()));
    }

    #[test]
    fn test_accessors() {
        let tree = MerkleTree::build(fruit()).unwrap();

        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.leaf(1), Some(b"banana".as_slice()));
        assert_eq!(tree.leaf(4), None);
        assert_eq!(tree.leaf_hashes().len(), 4);
        assert!(tree.level(3).is_none());
    }

    #[test]
    fn test_debug_output() {
        let tree = MerkleTree::build(fruit()).unwrap();
        let debug = format!("{:?}", tree);
        assert!(debug.contains("sha256"));
        assert!(debug.contains("leaf_count: 4"));
    }
}
