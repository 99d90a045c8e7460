use super::{Hash, HashMethod};
use sha2::{digest::FixedOutput, Digest};

/// Bitcoin-style SHA-256: double hash for leaves, single hash for nodes.
pub struct Sha256;

impl HashMethod for Sha256 {
    fn hash_leaf(data: &[u8]) -> Hash {
        // Double SHA-256 for leaf data
        let mut hasher = sha2::Sha256::new();
        hasher.update(data);
        let once = hasher.finalize_fixed();

        let mut hasher = sha2::Sha256::new();
        hasher.update(once);
        hasher.finalize_fixed().into()
    }

    fn hash_nodes(left: &[u8], right: &[u8]) -> Hash {
        // Single SHA-256 for internal nodes
        let mut hasher = sha2::Sha256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize_fixed().into()
    }
}
