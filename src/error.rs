use thiserror::Error;

/// Every failure the allowlist core can report.
///
/// A proof that does not reconstruct the expected root is not an error: the
/// verifier returns `Ok(false)` for it.
#[derive(Error, Debug)]
pub enum MerkleError {
    #[error("invalid identifier at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    #[error("cannot build a Merkle tree from an empty leaf set")]
    EmptyLeafSet,

    #[error("duplicate leaf 0x{hash} at index {index} (first seen at index {first})")]
    DuplicateLeaf {
        hash: String,
        index: usize,
        first: usize,
    },

    #[error("leaf not found in the Merkle tree: {0}")]
    LeafNotFound(String),

    #[error("invalid proof input: {0}")]
    InvalidProofInput(String),

    #[error("generated proof for position {0} does not match the Merkle root")]
    ProofSelfCheck(usize),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MerkleError {
    pub(crate) fn invalid_input(index: usize, reason: impl Into<String>) -> Self {
        MerkleError::InvalidInput {
            index,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MerkleError>;
