//! # Cryptographic Primitives
//!
//! The two primitives the protocol layer consumes: the chain hash (used for
//! address content hashes and every checksum) and Ed25519 keypairs (used to
//! sign transaction payloads). Everything above this module treats both as
//! opaque deterministic functions.

pub mod hash;
pub mod keys;

pub use hash::{blake3_256, chain_hash, sha256_array};
pub use keys::{KeyError, VelaKeypair, VelaPublicKey, VelaSignature};
