use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;

use super::hash::{to_hex, Hash};
use super::leaf::{Leaf, LeafHasher};
use super::options::{OddNodePolicy, TreeOptions};
use super::proof::{MerkleProof, MerkleProofTrait, PositionedProof, Side, SortedProof};
use crate::error::{MerkleError, Result};

/// An immutable, layered Merkle tree. Layer 0 holds the leaves, the last
/// layer holds only the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<Hash>>,
    // leaf at each layer-0 position, with its index in the caller's input
    leaves: Vec<Leaf>,
    // first layer-0 position of each leaf hash
    positions: HashMap<Hash, usize>,
    // input index -> layer-0 position
    by_input_index: Vec<usize>,
    options: TreeOptions,
}

impl MerkleTree {
    /// Build from already-hashed leaves in input order.
    pub fn build(leaves: Vec<Hash>, options: TreeOptions) -> Result<Self> {
        let total_start = Instant::now();
        if leaves.is_empty() {
            return Err(MerkleError::EmptyLeafSet);
        }

        if !options.allow_duplicate_leaves {
            reject_duplicates(&leaves)?;
        }

        let mut indexed: Vec<Leaf> = leaves
            .into_iter()
            .enumerate()
            .map(|(index, hash)| Leaf { hash, index })
            .collect();
        if options.sort_leaves {
            // stable, so equal hashes keep input order
            indexed.sort_by(|a, b| a.hash.cmp(&b.hash));
        }

        let mut by_input_index = vec![0; indexed.len()];
        let mut positions = HashMap::with_capacity(indexed.len());
        for (position, leaf) in indexed.iter().enumerate() {
            by_input_index[leaf.index] = position;
            positions.entry(leaf.hash).or_insert(position);
        }

        let build_start = Instant::now();
        let mut layers = vec![indexed.iter().map(|leaf| leaf.hash).collect::<Vec<_>>()];
        while let Some(layer) = layers.last().filter(|layer| layer.len() > 1) {
            let next = next_layer(layer, &options);
            layers.push(next);
        }
        debug!(
            "Building {} layers took {:?}",
            layers.len(),
            build_start.elapsed()
        );
        info!(
            "Built Merkle tree with {} leaves in {:?}",
            indexed.len(),
            total_start.elapsed()
        );

        Ok(Self {
            layers,
            leaves: indexed,
            positions,
            by_input_index,
            options,
        })
    }

    /// Canonicalize and hash `identifiers`, then build.
    pub fn from_identifiers<S>(identifiers: &[S], options: TreeOptions) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        let hashes = LeafHasher::new(options.hash_function).hash_identifiers(identifiers)?;
        Self::build(hashes, options)
    }

    pub fn root(&self) -> Hash {
        // build never produces an empty top layer
        self.layers[self.layers.len() - 1][0]
    }

    pub fn root_hex(&self) -> String {
        to_hex(&self.root())
    }

    pub fn layers(&self) -> &[Vec<Hash>] {
        &self.layers
    }

    /// Leaves in layer-0 order.
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Number of layers above the leaves.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub fn leaf_hasher(&self) -> LeafHasher {
        LeafHasher::new(self.options.hash_function)
    }

    /// Layer-0 position of `hash`; the first occurrence when duplicated.
    pub fn position_of(&self, hash: &Hash) -> Option<usize> {
        self.positions.get(hash).copied()
    }

    /// Layer-0 position of the leaf supplied at `index` in the input.
    pub fn position_of_index(&self, index: usize) -> Option<usize> {
        self.by_input_index.get(index).copied()
    }

    /// Sibling path from layer-0 `position` up to the root.
    pub fn proof(&self, position: usize) -> Result<MerkleProof> {
        let leaf = self
            .leaves
            .get(position)
            .ok_or_else(|| {
                MerkleError::LeafNotFound(format!(
                    "position {position} out of range for {} leaves",
                    self.leaves.len()
                ))
            })?
            .hash;

        let mut steps: Vec<(Side, Hash)> = Vec::with_capacity(self.depth());
        let mut node = position;
        for layer in &self.layers[..self.depth()] {
            let is_right = node % 2 == 1;
            let sibling = if is_right { node - 1 } else { node + 1 };

            if sibling < layer.len() {
                let side = if is_right { Side::Left } else { Side::Right };
                steps.push((side, layer[sibling]));
            } else if self.options.odd_node_policy == OddNodePolicy::Duplicate {
                steps.push((Side::Right, layer[node]));
            }
            node /= 2;
        }

        let proof = if self.options.sort_pairs {
            MerkleProof::Sorted(SortedProof::new(
                steps.into_iter().map(|(_, hash)| hash).collect(),
            ))
        } else {
            MerkleProof::Positioned(PositionedProof::new(steps))
        };

        // Check that the proof is correct
        if proof.verify(self.options.hash_function, &self.root(), &leaf) {
            Ok(proof)
        } else {
            Err(MerkleError::ProofSelfCheck(position))
        }
    }

    pub fn proof_for_hash(&self, hash: &Hash) -> Result<MerkleProof> {
        let position = self
            .position_of(hash)
            .ok_or_else(|| MerkleError::LeafNotFound(to_hex(hash)))?;
        self.proof(position)
    }

    pub fn proof_for_index(&self, index: usize) -> Result<MerkleProof> {
        let position = self.position_of_index(index).ok_or_else(|| {
            MerkleError::LeafNotFound(format!(
                "input index {index} out of range for {} leaves",
                self.leaves.len()
            ))
        })?;
        self.proof(position)
    }

    pub fn proof_for_identifier(&self, identifier: &str) -> Result<MerkleProof> {
        let hash = self.leaf_hasher().hash_identifier(identifier)?;
        self.proof_for_hash(&hash)
    }
}

fn next_layer(layer: &[Hash], options: &TreeOptions) -> Vec<Hash> {
    let hash = options.hash_function;
    layer
        .par_chunks(2)
        .map(|pair| match *pair {
            [left, right] => hash.hash_pair(&left, &right, options.sort_pairs),
            [lone] => match options.odd_node_policy {
                OddNodePolicy::Duplicate => hash.hash_pair(&lone, &lone, options.sort_pairs),
                OddNodePolicy::PromoteLone => lone,
            },
            _ => unreachable!("par_chunks(2) yields one or two entries"),
        })
        .collect()
}

fn reject_duplicates(leaves: &[Hash]) -> Result<()> {
    let Some(duplicate) = leaves.iter().duplicates().next() else {
        return Ok(());
    };
    let mut matches = leaves.iter().positions(|leaf| leaf == duplicate);
    let first = matches.next().unwrap_or_default();
    let index = matches.next().unwrap_or(first);
    Err(MerkleError::DuplicateLeaf {
        hash: hex::encode(duplicate),
        index,
        first,
    })
}
