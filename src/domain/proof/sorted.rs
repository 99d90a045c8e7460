use super::MerkleProofTrait;
use crate::domain::hash::{Hash, HashFunction};

/// Proof for a sorted-pair tree: sibling hashes only, leaf layer first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortedProof {
    pub steps: Vec<Hash>,
}

impl SortedProof {
    pub fn new(steps: Vec<Hash>) -> Self {
        Self { steps }
    }
}

impl MerkleProofTrait for SortedProof {
    fn proof_hashes(&self) -> Vec<Hash> {
        self.steps.clone()
    }

    fn root(&self, hash: HashFunction, leaf_hash: &Hash) -> Hash {
        self.steps
            .iter()
            .fold(*leaf_hash, |current, sibling| {
                hash.hash_pair(&current, sibling, true)
            })
    }

    fn len(&self) -> usize {
        self.steps.len()
    }
}
