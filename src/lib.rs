#![deny(clippy::all)]

#[cfg(feature = "napi")]
#[macro_use]
extern crate napi_derive;

pub mod application;
pub mod domain;
pub mod error;
#[cfg(feature = "napi")]
mod interfaces;

pub use application::{parse_allowlist, Allowlist, ProofRecord};
pub use domain::hash::{to_hex, Hash, HashFunction, HashMethod, Keccak256, Sha256, HASH_LEN};
pub use domain::leaf::{canonicalize_address, Leaf, LeafHasher};
pub use domain::options::{OddNodePolicy, TreeOptions};
pub use domain::proof::{MerkleProof, MerkleProofTrait, PositionedProof, Side, SortedProof};
pub use domain::tree::MerkleTree;
pub use domain::verify::{verify, verify_hex, verify_identifier};
pub use error::{MerkleError, Result};

/// Build a tree from hashed leaves.
pub fn build_tree(leaves: Vec<Hash>, options: TreeOptions) -> Result<MerkleTree> {
  MerkleTree::build(leaves, options)
}

/// Proof for the leaf hash `leaf` in `tree`.
pub fn generate_proof(tree: &MerkleTree, leaf: &Hash) -> Result<MerkleProof> {
  tree.proof_for_hash(leaf)
}
