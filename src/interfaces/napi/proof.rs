use super::{options::MerkleTreeOptionsJs, to_napi_error};
use crate::application::ProofRecord;
use crate::domain::{options::TreeOptions, proof::Side, verify::verify_hex};

fn parse_side(value: &str) -> napi::Result<Side> {
  match value {
    "left" => Ok(Side::Left),
    "right" => Ok(Side::Right),
    other => Err(napi::Error::from_reason(format!(
      "unknown proof position '{other}'"
    ))),
  }
}

/// Verify a hex proof against a hex root. `false` means not a member.
#[napi]
pub fn verify_proof_hex(
  leaf: String,
  proof: Vec<String>,
  root: String,
  positions: Option<Vec<String>>,
  options: Option<MerkleTreeOptionsJs>,
) -> napi::Result<bool> {
  let options = TreeOptions::try_from(options)?;
  let sides = positions
    .map(|p| p.iter().map(|s| parse_side(s)).collect::<napi::Result<Vec<_>>>())
    .transpose()?;
  verify_hex(&leaf, &proof, sides.as_deref(), &root, &options).map_err(to_napi_error)
}

/// Verify a JSON proof record as emitted by `MerkleAllowlist.proofRecordJson`.
#[napi]
pub fn verify_proof_record_json(json: String) -> napi::Result<bool> {
  let record: ProofRecord = serde_json::from_str(&json)
    .map_err(|e| napi::Error::from_reason(format!("invalid proof record: {e}")))?;
  record.verify().map_err(to_napi_error)
}
