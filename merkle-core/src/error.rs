/// Error type definitions
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Cannot build tree from an empty leaf sequence")]
    EmptyInput,

    #[error("Leaf not found")]
    LeafNotFound,

    #[error("Invalid leaf index: {index} (total leaves: {total})")]
    IndexOutOfRange { index: usize, total: usize },

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, MerkleError>;
