//! Stateless membership verification.
//!
//! The verifier never sees the tree: it replays the proof from the leaf with
//! the agreed [`TreeOptions`] and compares the result against the root. A
//! mismatch is `Ok(false)`. Only malformed input is an error.

use super::hash::{hash_from_hex, hash_from_slice, Hash};
use super::leaf::LeafHasher;
use super::options::TreeOptions;
use super::proof::{MerkleProof, MerkleProofTrait, Side};
use crate::error::{MerkleError, Result};

/// Verify `proof` for the leaf hash `leaf` against `root`.
pub fn verify(
    leaf: &[u8],
    proof: &MerkleProof,
    root: &[u8],
    options: &TreeOptions,
) -> Result<bool> {
    let leaf = hash_from_slice(leaf, "leaf")?;
    let root = hash_from_slice(root, "root")?;
    verify_hashes(&leaf, proof, &root, options)
}

pub fn verify_hashes(
    leaf: &Hash,
    proof: &MerkleProof,
    root: &Hash,
    options: &TreeOptions,
) -> Result<bool> {
    if !proof.is_compatible_with(options.sort_pairs) {
        return Err(MerkleError::InvalidProofInput(
            "proof has no sibling positions but pairs are not sorted".to_string(),
        ));
    }
    let ok = match proof {
        // replay positioned steps in sorted order when the tree sorts pairs
        MerkleProof::Positioned(positioned) if options.sort_pairs => positioned
            .proof_hashes()
            .iter()
            .fold(*leaf, |current, sibling| {
                options.hash_function.hash_pair(&current, sibling, true)
            })
            == *root,
        _ => proof.verify(options.hash_function, root, leaf),
    };
    Ok(ok)
}

/// Verify from the `0x`-hex rendering used by wallets and contracts.
pub fn verify_hex<S: AsRef<str>>(
    leaf: &str,
    proof: &[S],
    sides: Option<&[Side]>,
    root: &str,
    options: &TreeOptions,
) -> Result<bool> {
    let leaf = hash_from_hex(leaf, "leaf")?;
    let root = hash_from_hex(root, "root")?;
    let proof = MerkleProof::from_hex(proof, sides, options.sort_pairs)?;
    verify_hashes(&leaf, &proof, &root, options)
}

/// Canonicalize and hash `identifier`, then verify.
pub fn verify_identifier(
    identifier: &str,
    proof: &MerkleProof,
    root: &[u8],
    options: &TreeOptions,
) -> Result<bool> {
    let leaf = LeafHasher::new(options.hash_function).hash_identifier(identifier)?;
    let root = hash_from_slice(root, "root")?;
    verify_hashes(&leaf, proof, &root, options)
}
