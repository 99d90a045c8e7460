pub mod hash;
pub mod leaf;
pub mod options;
pub mod proof;
pub mod tree;
pub mod verify;
