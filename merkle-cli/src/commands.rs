//! 默克爾樹工作流模塊
//!
//! 將 `merkle-core` 的構建、證明、驗證操作封裝為命令行子命令使用的工作流，
//! 並根據配置的哈希算法分派到對應的 [`Hasher`] 實現。
//!
//! # 工作流
//!
//! 1. **summarize**: 葉子 → 樹 → 根、葉子數、深度
//! 2. **prove**: 葉子 + 選擇器 → 證明文檔（含根）
//! 3. **verify**: 證明文檔 → 是否通過驗證（不需要原始樹）
//! 4. **inspect**: 葉子 → 每一層的所有摘要

use merkle_core::{Digest, Hasher, MerkleTree, Sha256Hasher, Sha3_256Hasher};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::types::{HashAlgorithm, LeafSelector, ProofDocument, TreeSummary};

/// 構建樹並返回摘要
pub fn summarize(leaves: &[String], algorithm: HashAlgorithm) -> Result<TreeSummary> {
    match algorithm {
        HashAlgorithm::Sha256 => summarize_with::<Sha256Hasher>(leaves, algorithm),
        HashAlgorithm::Sha3_256 => summarize_with::<Sha3_256Hasher>(leaves, algorithm),
    }
}

fn summarize_with<H: Hasher>(leaves: &[String], algorithm: HashAlgorithm) -> Result<TreeSummary> {
    let tree = MerkleTree::<H>::from_leaves(leaves)?;

    info!(
        "Merkle tree built: {} leaves, depth {}, root: {}",
        tree.leaf_count(),
        tree.depth(),
        tree.root()
    );

    Ok(TreeSummary {
        algorithm,
        leaf_count: tree.leaf_count(),
        depth: tree.depth(),
        root: tree.root(),
    })
}

/// 為選中的葉子生成證明文檔
///
/// # 錯誤
/// - 葉子為空: `MerkleError::EmptyInput`
/// - 索引越界: `MerkleError::IndexOutOfRange`
/// - 值不存在: `MerkleError::LeafNotFound`
pub fn prove(
    leaves: &[String],
    algorithm: HashAlgorithm,
    selector: &LeafSelector,
) -> Result<ProofDocument> {
    match algorithm {
        HashAlgorithm::Sha256 => prove_with::<Sha256Hasher>(leaves, algorithm, selector),
        HashAlgorithm::Sha3_256 => prove_with::<Sha3_256Hasher>(leaves, algorithm, selector),
    }
}

fn prove_with<H: Hasher>(
    leaves: &[String],
    algorithm: HashAlgorithm,
    selector: &LeafSelector,
) -> Result<ProofDocument> {
    let tree = MerkleTree::<H>::from_leaves(leaves)?;

    let leaf_index = match selector {
        LeafSelector::Index(index) => *index,
        LeafSelector::Value(value) => tree
            .index_of(value)
            .ok_or(merkle_core::MerkleError::LeafNotFound)?,
    };

    let proof = tree.proof(leaf_index)?;

    debug!(
        "Proof for leaf {}: {} steps (tree depth {})",
        leaf_index,
        proof.len(),
        tree.depth()
    );

    Ok(ProofDocument {
        leaf: leaves[leaf_index].clone(),
        leaf_index,
        algorithm,
        root: tree.root(),
        proof,
    })
}

/// 驗證證明文檔
///
/// 只使用文檔中的葉子、證明路徑和根，不重建樹
pub fn verify_document(document: &ProofDocument) -> bool {
    verify(&document.leaf, document, &document.root)
}

/// 使用指定的葉子和根驗證證明文檔中的路徑
pub fn verify(leaf: &str, document: &ProofDocument, root: &Digest) -> bool {
    let is_valid = match document.algorithm {
        HashAlgorithm::Sha256 => document.proof.verify_with::<Sha256Hasher, _>(leaf, root),
        HashAlgorithm::Sha3_256 => document.proof.verify_with::<Sha3_256Hasher, _>(leaf, root),
    };

    if is_valid {
        info!("Proof verified for leaf {:?} against root {}", leaf, root);
    } else {
        warn!("Proof verification FAILED for leaf {:?} against root {}", leaf, root);
    }

    is_valid
}

/// 返回樹的每一層（第 0 層為葉子摘要，最後一層為根）
pub fn inspect(leaves: &[String], algorithm: HashAlgorithm) -> Result<Vec<Vec<Digest>>> {
    let levels = match algorithm {
        HashAlgorithm::Sha256 => MerkleTree::<Sha256Hasher>::from_leaves(leaves)?
            .levels()
            .to_vec(),
        HashAlgorithm::Sha3_256 => MerkleTree::<Sha3_256Hasher>::from_leaves(leaves)?
            .levels()
            .to_vec(),
    };

    Ok(levels)
}
