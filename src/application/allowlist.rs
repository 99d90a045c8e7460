//! Allowlist workflow: the leaf set comes in as addresses, the root and the
//! per-participant proofs go out as `0x`-hex, ready for a contract or a gate
//! that only stores the root.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::hash::{to_hex, Hash};
use crate::domain::leaf::{canonical_address_string, LeafHasher};
use crate::domain::options::TreeOptions;
use crate::domain::proof::{MerkleProof, MerkleProofTrait, Side};
use crate::domain::tree::MerkleTree;
use crate::domain::verify::verify_hex;
use crate::error::Result;

/// Read an allowlist document: either a JSON array of strings, or one
/// address per line with blank lines and `#` comments ignored.
pub fn parse_allowlist(text: &str) -> Result<Vec<String>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        let entries: Vec<String> = serde_json::from_str(trimmed)?;
        debug!("Parsed {} entries from JSON allowlist", entries.len());
        return Ok(entries);
    }

    let entries: Vec<String> = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    debug!("Parsed {} entries from text allowlist", entries.len());
    Ok(entries)
}

/// Everything a claimant needs, as plain strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProofRecord {
    pub address: String,
    pub leaf: String,
    pub proof: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<Side>>,
    pub root: String,
    pub options: TreeOptions,
}

impl ProofRecord {
    /// Check the record on its own: the leaf must be the hash of the address
    /// and the proof must lead from it to the root.
    pub fn verify(&self) -> Result<bool> {
        let leaf = LeafHasher::new(self.options.hash_function).hash_identifier(&self.address)?;
        if to_hex(&leaf) != self.leaf.to_lowercase() {
            warn!("Record leaf {} does not match address {}", self.leaf, self.address);
            return Ok(false);
        }
        verify_hex(
            &self.leaf,
            &self.proof,
            self.positions.as_deref(),
            &self.root,
            &self.options,
        )
    }
}

/// A built allowlist: canonical addresses in input order plus their tree.
#[derive(Debug, Clone)]
pub struct Allowlist {
    addresses: Vec<String>,
    tree: MerkleTree,
}

impl Allowlist {
    pub fn new<S>(identifiers: &[S], options: TreeOptions) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        let tree = MerkleTree::from_identifiers(identifiers, options)?;
        let addresses = identifiers
            .iter()
            .map(|id| canonical_address_string(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        info!(
            "Allowlist of {} addresses committed to root {}",
            addresses.len(),
            tree.root_hex()
        );
        Ok(Self { addresses, tree })
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    pub fn options(&self) -> &TreeOptions {
        self.tree.options()
    }

    pub fn root(&self) -> Hash {
        self.tree.root()
    }

    pub fn root_hex(&self) -> String {
        self.tree.root_hex()
    }

    /// Canonical addresses in input order.
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn leaf(&self, identifier: &str) -> Result<Hash> {
        self.tree.leaf_hasher().hash_identifier(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.leaf(identifier)
            .map(|leaf| self.tree.position_of(&leaf).is_some())
            .unwrap_or(false)
    }

    pub fn proof(&self, identifier: &str) -> Result<MerkleProof> {
        self.tree.proof_for_identifier(identifier)
    }

    pub fn proof_record(&self, identifier: &str) -> Result<ProofRecord> {
        let address = canonical_address_string(identifier)?;
        let leaf = self.leaf(identifier)?;
        let proof = self.tree.proof_for_hash(&leaf)?;
        Ok(self.record(address, &leaf, &proof))
    }

    /// One record per input entry, in input order.
    pub fn records(&self) -> Result<Vec<ProofRecord>> {
        self.addresses
            .iter()
            .enumerate()
            .map(|(index, address)| {
                let proof = self.tree.proof_for_index(index)?;
                let position = self.tree.position_of_index(index).unwrap_or_default();
                let leaf = self.tree.leaves()[position].hash;
                Ok(self.record(address.clone(), &leaf, &proof))
            })
            .collect()
    }

    fn record(&self, address: String, leaf: &Hash, proof: &MerkleProof) -> ProofRecord {
        ProofRecord {
            address,
            leaf: to_hex(leaf),
            proof: proof.proof_hashes_hex(),
            positions: proof.sides(),
            root: self.root_hex(),
            options: *self.options(),
        }
    }
}
