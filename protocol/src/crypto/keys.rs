//! # Key Management
//!
//! Ed25519 keypair generation and serialization for Vela accounts.
//!
//! Private keys never leave this module as anything other than an explicit
//! `to_bytes()` call. `VelaKeypair` intentionally does not implement
//! `Serialize`, so a keypair cannot end up in a JSON response by accident.
//! Public keys and signatures cross the wire base-58 encoded, like every
//! other byte string in this protocol.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during key operations.
///
/// Deliberately vague about *why* decoding failed: error messages must not
/// leak information about key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// An Ed25519 signing keypair.
///
/// The atomic unit of identity: every address and every transaction
/// signature traces back to one of these.
///
/// # Examples
///
/// ```
/// use vela_protocol::crypto::VelaKeypair;
///
/// let kp = VelaKeypair::generate();
/// let sig = kp.sign(b"register contract");
/// assert!(kp.public_key().verify(b"register contract", &sig));
/// ```
pub struct VelaKeypair {
    signing_key: SigningKey,
}

/// The public half of a keypair, safe to share.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VelaPublicKey {
    bytes: [u8; 32],
}

/// An Ed25519 signature over a message. Always 64 bytes; anything else
/// simply fails verification.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VelaSignature {
    bytes: Vec<u8>,
}

impl VelaKeypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    ///
    /// In Ed25519 the 32-byte secret key *is* the seed. A weak seed gives a
    /// weak key; feed this from a CSPRNG or a KDF.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Reconstruct a keypair from a base-58 encoded secret key, the text
    /// form used by wallet exports.
    pub fn from_base58(text: &str) -> Result<Self, KeyError> {
        let bytes = bs58::decode(text)
            .into_vec()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeyError::InvalidSecretKey);
        }
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        seed.copy_from_slice(&bytes);
        Ok(Self::from_seed(&seed))
    }

    /// The raw 32-byte secret key. Handle with care.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// The public half of this keypair.
    pub fn public_key(&self) -> VelaPublicKey {
        VelaPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Sign a message. Ed25519 is deterministic: the same keypair and
    /// message always produce the same 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> VelaSignature {
        VelaSignature {
            bytes: self.signing_key.sign(message).to_bytes().to_vec(),
        }
    }
}

impl fmt::Debug for VelaKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the secret half.
        write!(f, "VelaKeypair({})", self.public_key().to_base58())
    }
}

impl VelaPublicKey {
    /// Wrap raw 32-byte public key material.
    ///
    /// Validity as an Ed25519 point is checked at verification time, not
    /// here; address derivation only hashes the bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Decode a base-58 public key string.
    pub fn from_base58(text: &str) -> Result<Self, KeyError> {
        let decoded = bs58::decode(text)
            .into_vec()
            .map_err(|_| KeyError::InvalidPublicKey)?;
        if decoded.len() != 32 {
            return Err(KeyError::InvalidPublicKey);
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }

    /// The raw 32 key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Base-58 text form, as carried in broadcast records.
    pub fn to_base58(&self) -> String {
        bs58::encode(&self.bytes).into_string()
    }

    /// Verify a signature over a message. Returns `false` for malformed
    /// keys or signatures; no panics on attacker-controlled input.
    pub fn verify(&self, message: &[u8], signature: &VelaSignature) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature.bytes.as_slice()) else {
            return false;
        };
        key.verify(message, &DalekSignature::from_bytes(&sig_bytes))
            .is_ok()
    }
}

impl fmt::Debug for VelaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VelaPublicKey({})", self.to_base58())
    }
}

impl fmt::Display for VelaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl VelaSignature {
    /// Wrap raw signature bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Base-58 text form, as carried in broadcast records.
    pub fn to_base58(&self) -> String {
        bs58::encode(&self.bytes).into_string()
    }
}

impl fmt::Debug for VelaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VelaSignature({})", self.to_base58())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_roundtrip() {
        let kp = VelaKeypair::generate();
        let msg = b"execute function 4";
        let sig = kp.sign(msg);
        assert!(kp.public_key().verify(msg, &sig));
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let kp = VelaKeypair::generate();
        let sig = kp.sign(b"original");
        assert!(!kp.public_key().verify(b"tampered", &sig));
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let kp1 = VelaKeypair::generate();
        let kp2 = VelaKeypair::generate();
        let sig = kp1.sign(b"msg");
        assert!(!kp2.public_key().verify(b"msg", &sig));
    }

    #[test]
    fn verify_rejects_short_signature() {
        let kp = VelaKeypair::generate();
        let sig = VelaSignature::from_bytes(vec![0u8; 10]);
        assert!(!kp.public_key().verify(b"msg", &sig));
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = VelaKeypair::from_seed(&[9u8; 32]);
        assert_eq!(kp.sign(b"msg").as_bytes(), kp.sign(b"msg").as_bytes());
    }

    #[test]
    fn seed_roundtrips_through_base58() {
        let kp = VelaKeypair::from_seed(&[7u8; 32]);
        let encoded = bs58::encode(kp.to_bytes()).into_string();
        let recovered = VelaKeypair::from_base58(&encoded).unwrap();
        assert_eq!(kp.to_bytes(), recovered.to_bytes());
    }

    #[test]
    fn public_key_base58_roundtrip() {
        let pk = VelaKeypair::generate().public_key();
        let text = pk.to_base58();
        let recovered = VelaPublicKey::from_base58(&text).unwrap();
        assert_eq!(pk, recovered);
    }

    #[test]
    fn bad_base58_secret_rejected() {
        assert!(matches!(
            VelaKeypair::from_base58("0OIl"),
            Err(KeyError::InvalidSecretKey)
        ));
    }

    #[test]
    fn wrong_length_public_key_rejected() {
        let short = bs58::encode([1u8; 16]).into_string();
        assert!(matches!(
            VelaPublicKey::from_base58(&short),
            Err(KeyError::InvalidPublicKey)
        ));
    }

    #[test]
    fn debug_never_prints_secret() {
        let kp = VelaKeypair::from_seed(&[3u8; 32]);
        let secret_b58 = bs58::encode(kp.to_bytes()).into_string();
        let debug = format!("{:?}", kp);
        assert!(!debug.contains(&secret_b58));
    }
}
