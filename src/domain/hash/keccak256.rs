use super::{Hash, HashMethod};
use sha3::{digest::FixedOutput, Digest};

/// Ethereum keccak256. Leaves are `keccak256(data)`, which for a 20-byte
/// address equals Solidity's `keccak256(abi.encodePacked(account))`.
pub struct Keccak256;

impl HashMethod for Keccak256 {
    fn hash_leaf(data: &[u8]) -> Hash {
        let mut hasher = sha3::Keccak256::new();
        hasher.update(data);
        hasher.finalize_fixed().into()
    }

    fn hash_nodes(left: &[u8], right: &[u8]) -> Hash {
        let mut hasher = sha3::Keccak256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize_fixed().into()
    }
}
