//! # Hashing
//!
//! The ledger's canonical digest (the *chain hash*) is a two-stage
//! composition: BLAKE3 over the input, then SHA-256 over the BLAKE3 digest.
//! Both stages produce 32 bytes, so the chain hash is 32 bytes of which the
//! protocol layer uses at most 24 (20 for address content, 4 for checksums).
//!
//! Address derivation, address validation, and token-id checksums all call
//! [`chain_hash`]. Changing this function is a hard fork.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash and return a fixed-size array.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the BLAKE3 hash of the input data.
pub fn blake3_256(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// The ledger's canonical digest: `SHA-256(BLAKE3(data))`.
///
/// Deterministic, 32 bytes. Used for address content hashes and for every
/// checksum in the address and token-id schemes.
///
/// # Example
///
/// ```
/// use vela_protocol::crypto::chain_hash;
///
/// let digest = chain_hash(b"vela");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn chain_hash(data: &[u8]) -> [u8; 32] {
    sha256_array(&blake3_256(data))
}
