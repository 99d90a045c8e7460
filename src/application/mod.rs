pub mod allowlist;

pub use allowlist::{parse_allowlist, Allowlist, ProofRecord};
