//! Canonicalization and hashing of participant identifiers.
//!
//! An identifier is an EVM account address. Its canonical form is the 20 raw
//! bytes: surrounding whitespace is trimmed, an optional `0x`/`0X` prefix is
//! removed, and exactly 40 hex digits of any case are required. Checksum
//! casing (EIP-55) is accepted but not enforced, so every textual spelling of
//! the same account hashes to the same leaf.

use rayon::prelude::*;

use super::hash::{Hash, HashFunction};
use crate::error::{MerkleError, Result};

pub const ADDRESS_LEN: usize = 20;

pub type Address = [u8; ADDRESS_LEN];

/// One leaf of the tree: the hashed identifier and its position in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leaf {
    pub hash: Hash,
    pub index: usize,
}

/// Parse an address into its canonical 20 bytes.
pub fn canonicalize_address(identifier: &str) -> Result<Address> {
    canonicalize_at(identifier, 0)
}

/// Lowercase `0x`-prefixed rendering of the canonical form.
pub fn canonical_address_string(identifier: &str) -> Result<String> {
    canonicalize_address(identifier).map(|address| format!("0x{}", hex::encode(address)))
}

fn canonicalize_at(identifier: &str, index: usize) -> Result<Address> {
    let trimmed = identifier.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != 2 * ADDRESS_LEN {
        return Err(MerkleError::invalid_input(
            index,
            format!(
                "'{identifier}' must have {} hex digits, got {}",
                2 * ADDRESS_LEN,
                digits.len()
            ),
        ));
    }

    let mut address = [0u8; ADDRESS_LEN];
    hex::decode_to_slice(digits, &mut address).map_err(|e| {
        MerkleError::invalid_input(index, format!("'{identifier}' is not valid hex: {e}"))
    })?;
    Ok(address)
}

/// Turns identifiers into leaf hashes with a fixed hash function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeafHasher {
    hash_function: HashFunction,
}

impl LeafHasher {
    pub fn new(hash_function: HashFunction) -> Self {
        Self { hash_function }
    }

    pub fn hash_function(&self) -> HashFunction {
        self.hash_function
    }

    /// Hash a textual address.
    pub fn hash_identifier(&self, identifier: &str) -> Result<Hash> {
        let address = canonicalize_address(identifier)?;
        Ok(self.hash_function.hash_leaf(&address))
    }

    /// Hash an address already in raw byte form.
    pub fn hash_address_bytes(&self, address: &[u8]) -> Result<Hash> {
        if address.len() != ADDRESS_LEN {
            return Err(MerkleError::invalid_input(
                0,
                format!(
                    "raw address must be {ADDRESS_LEN} bytes, got {}",
                    address.len()
                ),
            ));
        }
        Ok(self.hash_function.hash_leaf(address))
    }

    /// Hash a batch in parallel. The error names the first bad index.
    pub fn hash_identifiers<S>(&self, identifiers: &[S]) -> Result<Vec<Hash>>
    where
        S: AsRef<str> + Sync,
    {
        let hashed: Vec<Result<Hash>> = identifiers
            .par_iter()
            .enumerate()
            .map(|(index, identifier)| {
                canonicalize_at(identifier.as_ref(), index)
                    .map(|address| self.hash_function.hash_leaf(&address))
            })
            .collect();
        hashed.into_iter().collect()
    }
}
