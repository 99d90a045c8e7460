use super::{options::parse_hash_function, to_napi_error};
use crate::domain::{hash::to_hex, leaf::LeafHasher};

/// Leaf hash of `address`, `0x`-hex. Defaults to keccak256.
#[napi]
pub fn hash_address(address: String, hash_function: Option<String>) -> napi::Result<String> {
  let hash_function = match hash_function {
    Some(name) => parse_hash_function(&name)?,
    None => Default::default(),
  };
  LeafHasher::new(hash_function)
    .hash_identifier(&address)
    .map(|leaf| to_hex(&leaf))
    .map_err(to_napi_error)
}
