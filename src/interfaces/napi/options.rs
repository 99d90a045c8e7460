use crate::domain::{
  hash::HashFunction,
  options::{OddNodePolicy, TreeOptions},
};

#[napi(object, js_name = "MerkleTreeOptions")]
#[derive(Clone, Default)]
pub struct MerkleTreeOptionsJs {
  pub hash_function: Option<String>,
  pub sort_pairs: Option<bool>,
  pub sort_leaves: Option<bool>,
  pub odd_node_policy: Option<String>,
  pub allow_duplicate_leaves: Option<bool>,
}

pub(crate) fn parse_hash_function(name: &str) -> napi::Result<HashFunction> {
  match name.to_ascii_lowercase().as_str() {
    "keccak256" => Ok(HashFunction::Keccak256),
    "sha256" => Ok(HashFunction::Sha256),
    other => Err(napi::Error::from_reason(format!(
      "unknown hash function '{other}'"
    ))),
  }
}

impl TryFrom<Option<MerkleTreeOptionsJs>> for TreeOptions {
  type Error = napi::Error;

  fn try_from(value: Option<MerkleTreeOptionsJs>) -> napi::Result<Self> {
    let value = value.unwrap_or_default();
    let defaults = TreeOptions::default();

    let odd_node_policy = match value.odd_node_policy.as_deref() {
      None => defaults.odd_node_policy,
      Some("duplicate") => OddNodePolicy::Duplicate,
      Some("promoteLone") => OddNodePolicy::PromoteLone,
      Some(other) => {
        return Err(napi::Error::from_reason(format!(
          "unknown odd node policy '{other}'"
        )))
      }
    };

    Ok(TreeOptions {
      hash_function: value
        .hash_function
        .as_deref()
        .map(parse_hash_function)
        .transpose()?
        .unwrap_or(defaults.hash_function),
      sort_pairs: value.sort_pairs.unwrap_or(defaults.sort_pairs),
      sort_leaves: value.sort_leaves.unwrap_or(defaults.sort_leaves),
      odd_node_policy,
      allow_duplicate_leaves: value
        .allow_duplicate_leaves
        .unwrap_or(defaults.allow_duplicate_leaves),
    })
  }
}
