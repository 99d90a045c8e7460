use serde::{Deserialize, Serialize};

use crate::error::{MerkleError, Result};

pub mod keccak256;
pub mod sha256;

pub use keccak256::Keccak256;
pub use sha256::Sha256;

/// Width in bytes of every leaf, node and root.
pub const HASH_LEN: usize = 32;

pub type Hash = [u8; HASH_LEN];

pub trait HashMethod {
    /// Hash a canonicalized identifier into a leaf.
    fn hash_leaf(data: &[u8]) -> Hash;

    /// Hash two child nodes together, `left || right`.
    fn hash_nodes(left: &[u8], right: &[u8]) -> Hash;
}

/// Runtime identity of the hash function a tree was built with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HashFunction {
    #[default]
    Keccak256,
    Sha256,
}

impl HashFunction {
    pub fn hash_leaf(self, data: &[u8]) -> Hash {
        match self {
            HashFunction::Keccak256 => Keccak256::hash_leaf(data),
            HashFunction::Sha256 => Sha256::hash_leaf(data),
        }
    }

    pub fn hash_nodes(self, left: &[u8], right: &[u8]) -> Hash {
        match self {
            HashFunction::Keccak256 => Keccak256::hash_nodes(left, right),
            HashFunction::Sha256 => Sha256::hash_nodes(left, right),
        }
    }

    /// Combine two siblings into their parent. With `sort_pairs` the smaller
    /// value (big-endian) goes first, so the parent does not depend on order.
    pub fn hash_pair(self, left: &Hash, right: &Hash, sort_pairs: bool) -> Hash {
        if sort_pairs && right < left {
            self.hash_nodes(right, left)
        } else {
            self.hash_nodes(left, right)
        }
    }
}

/// Render a hash the way wallets and contracts expect it: `0x` + lowercase hex.
pub fn to_hex(hash: &[u8]) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parse a fixed-width hash from raw bytes.
pub fn hash_from_slice(bytes: &[u8], name: &str) -> Result<Hash> {
    if bytes.is_empty() {
        return Err(MerkleError::InvalidProofInput(format!("{name} is empty")));
    }
    bytes.try_into().map_err(|_| {
        MerkleError::InvalidProofInput(format!(
            "{name} must be {HASH_LEN} bytes, got {} bytes",
            bytes.len()
        ))
    })
}

/// Parse a fixed-width hash from hex, with or without the `0x` prefix.
pub fn hash_from_hex(value: &str, name: &str) -> Result<Hash> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits)
        .map_err(|e| MerkleError::InvalidProofInput(format!("{name} is not valid hex: {e}")))?;
    hash_from_slice(&bytes, name)
}
