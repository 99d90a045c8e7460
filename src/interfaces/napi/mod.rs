use std::panic;

use crate::error::MerkleError;

pub mod leaf;
pub mod options;
pub mod proof;
pub mod tree;

#[napi]
pub fn init() {
  panic::set_hook(Box::new(|_| {}));
  let _ = env_logger::try_init();
}

pub(crate) fn to_napi_error(error: MerkleError) -> napi::Error {
  napi::Error::from_reason(error.to_string())
}
