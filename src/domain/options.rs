use serde::{Deserialize, Serialize};

use super::hash::HashFunction;

/// How a layer with an odd number of entries treats its last node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OddNodePolicy {
    /// Pair the lone node with itself.
    Duplicate,
    /// Copy the lone node unchanged into the next layer.
    #[default]
    PromoteLone,
}

/// Everything a builder and a verifier must agree on. A mismatch on any field
/// silently turns valid proofs into `false`, so this travels with the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeOptions {
    pub hash_function: HashFunction,
    pub sort_pairs: bool,
    pub sort_leaves: bool,
    pub odd_node_policy: OddNodePolicy,
    pub allow_duplicate_leaves: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            hash_function: HashFunction::Keccak256,
            sort_pairs: true,
            sort_leaves: false,
            odd_node_policy: OddNodePolicy::PromoteLone,
            allow_duplicate_leaves: true,
        }
    }
}

impl TreeOptions {
    pub fn with_hash_function(mut self, hash_function: HashFunction) -> Self {
        self.hash_function = hash_function;
        self
    }

    pub fn with_sort_pairs(mut self, sort_pairs: bool) -> Self {
        self.sort_pairs = sort_pairs;
        self
    }

    pub fn with_sort_leaves(mut self, sort_leaves: bool) -> Self {
        self.sort_leaves = sort_leaves;
        self
    }

    pub fn with_odd_node_policy(mut self, policy: OddNodePolicy) -> Self {
        self.odd_node_policy = policy;
        self
    }

    pub fn with_allow_duplicate_leaves(mut self, allow: bool) -> Self {
        self.allow_duplicate_leaves = allow;
        self
    }
}
