use napi::bindgen_prelude::Uint8Array;

use super::{options::MerkleTreeOptionsJs, to_napi_error};
use crate::application::Allowlist;
use crate::domain::{
  hash::to_hex,
  options::TreeOptions,
  proof::{MerkleProofTrait, Side},
};

#[napi(js_name = "MerkleAllowlist")]
pub struct MerkleAllowlistJs {
  inner: Allowlist,
}

#[napi]
impl MerkleAllowlistJs {
  #[napi(constructor)]
  pub fn new(addresses: Vec<String>, options: Option<MerkleTreeOptionsJs>) -> napi::Result<Self> {
    let options = TreeOptions::try_from(options)?;
    Ok(Self {
      inner: Allowlist::new(&addresses, options).map_err(to_napi_error)?,
    })
  }

  #[napi]
  pub fn root(&self) -> Uint8Array {
    self.inner.root().to_vec().into()
  }

  #[napi]
  pub fn root_hex(&self) -> String {
    self.inner.root_hex()
  }

  #[napi]
  pub fn length(&self) -> u32 {
    self.inner.len() as u32
  }

  #[napi]
  pub fn contains(&self, address: String) -> bool {
    self.inner.contains(&address)
  }

  #[napi]
  pub fn leaf_hex(&self, address: String) -> napi::Result<String> {
    self
      .inner
      .leaf(&address)
      .map(|leaf| to_hex(&leaf))
      .map_err(to_napi_error)
  }

  #[napi]
  pub fn proof_hex(&self, address: String) -> napi::Result<Vec<String>> {
    self
      .inner
      .proof(&address)
      .map(|proof| proof.proof_hashes_hex())
      .map_err(to_napi_error)
  }

  /// `"left"`/`"right"` per proof entry, or null for sorted-pair trees.
  #[napi]
  pub fn proof_positions(&self, address: String) -> napi::Result<Option<Vec<String>>> {
    let proof = self.inner.proof(&address).map_err(to_napi_error)?;
    Ok(proof.sides().map(|sides| {
      sides
        .into_iter()
        .map(|side| match side {
          Side::Left => "left".to_string(),
          Side::Right => "right".to_string(),
        })
        .collect()
    }))
  }

  #[napi]
  pub fn proof_record_json(&self, address: String) -> napi::Result<String> {
    let record = self.inner.proof_record(&address).map_err(to_napi_error)?;
    serde_json::to_string(&record).map_err(|e| napi::Error::from_reason(e.to_string()))
  }
}
