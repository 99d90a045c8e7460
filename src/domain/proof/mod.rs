use serde::{Deserialize, Serialize};

use super::hash::{hash_from_hex, to_hex, Hash, HashFunction};
use crate::error::{MerkleError, Result};

pub mod positioned;
pub mod sorted;

pub use positioned::PositionedProof;
pub use sorted::SortedProof;

/// Which side of the current node a proof sibling sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
}

pub trait MerkleProofTrait {
    /// Fold the leaf with every sibling, returning the reconstructed root.
    fn root(&self, hash: HashFunction, leaf_hash: &Hash) -> Hash;

    /// Sibling hashes in root-ward order.
    fn proof_hashes(&self) -> Vec<Hash>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify a proof by comparing the recomputed root with `root`.
    fn verify(&self, hash: HashFunction, root: &Hash, leaf_hash: &Hash) -> bool {
        self.root(hash, leaf_hash) == *root
    }

    fn proof_hashes_hex(&self) -> Vec<String> {
        self.proof_hashes().iter().map(|h| to_hex(h)).collect()
    }
}

/// A membership proof. Sorted-pair trees need only the sibling hashes,
/// other trees also need each sibling's side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MerkleProof {
    Sorted(SortedProof),
    Positioned(PositionedProof),
}

impl MerkleProof {
    /// Rebuild a proof from its hex rendering. `sides` is required exactly
    /// when pairs are not sorted, one per hash.
    pub fn from_hex<S: AsRef<str>>(
        hashes: &[S],
        sides: Option<&[Side]>,
        sort_pairs: bool,
    ) -> Result<Self> {
        let hashes = hashes
            .iter()
            .enumerate()
            .map(|(i, h)| hash_from_hex(h.as_ref(), &format!("proof entry {i}")))
            .collect::<Result<Vec<Hash>>>()?;

        match (sort_pairs, sides) {
            (true, None) => Ok(MerkleProof::Sorted(SortedProof::new(hashes))),
            (_, Some(sides)) => {
                if sides.len() != hashes.len() {
                    return Err(MerkleError::InvalidProofInput(format!(
                        "{} proof entries but {} positions",
                        hashes.len(),
                        sides.len()
                    )));
                }
                Ok(MerkleProof::Positioned(PositionedProof::new(
                    sides.iter().copied().zip(hashes).collect(),
                )))
            }
            (false, None) => Err(MerkleError::InvalidProofInput(
                "positions are required when pairs are not sorted".to_string(),
            )),
        }
    }

    /// Sibling sides, when the proof carries them.
    pub fn sides(&self) -> Option<Vec<Side>> {
        match self {
            MerkleProof::Sorted(_) => None,
            MerkleProof::Positioned(proof) => {
                Some(proof.steps.iter().map(|(side, _)| *side).collect())
            }
        }
    }

    /// Whether this proof shape can be replayed under `sort_pairs`.
    pub fn is_compatible_with(&self, sort_pairs: bool) -> bool {
        match self {
            MerkleProof::Sorted(_) => sort_pairs,
            MerkleProof::Positioned(_) => true,
        }
    }
}

impl MerkleProofTrait for MerkleProof {
    fn root(&self, hash: HashFunction, leaf_hash: &Hash) -> Hash {
        match self {
            MerkleProof::Sorted(proof) => proof.root(hash, leaf_hash),
            MerkleProof::Positioned(proof) => proof.root(hash, leaf_hash),
        }
    }

    fn proof_hashes(&self) -> Vec<Hash> {
        match self {
            MerkleProof::Sorted(proof) => proof.proof_hashes(),
            MerkleProof::Positioned(proof) => proof.proof_hashes(),
        }
    }

    fn len(&self) -> usize {
        match self {
            MerkleProof::Sorted(proof) => proof.len(),
            MerkleProof::Positioned(proof) => proof.len(),
        }
    }
}
