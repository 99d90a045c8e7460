use super::{MerkleProofTrait, Side};
use crate::domain::hash::{Hash, HashFunction};

/// A Merkle proof that holds a list of `(side, sibling_hash)` pairs.
/// `Side::Left` means the order is `(sibling, current)`,
/// `Side::Right` means the order is `(current, sibling)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionedProof {
    pub steps: Vec<(Side, Hash)>,
}

impl PositionedProof {
    pub fn new(steps: Vec<(Side, Hash)>) -> Self {
        Self { steps }
    }
}

impl MerkleProofTrait for PositionedProof {
    fn proof_hashes(&self) -> Vec<Hash> {
        self.steps.iter().map(|(_, sibling)| *sibling).collect()
    }

    fn root(&self, hash: HashFunction, leaf_hash: &Hash) -> Hash {
        let mut current = *leaf_hash;

        for (side, sibling) in self.steps.iter() {
            current = match side {
                Side::Left => hash.hash_nodes(sibling, &current),
                Side::Right => hash.hash_nodes(&current, sibling),
            };
        }
        current
    }

    fn len(&self) -> usize {
        self.steps.len()
    }
}
