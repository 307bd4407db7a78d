//! Address derivation and checksum validation.
//!
//! Derivation is pure: hash the public key, frame it with the network
//! bytes, checksum, base-58. Validation re-runs the same arithmetic over a
//! decoded address and rejects on the first defect. Callers get a plain
//! boolean; the typed defect is logged, and available via
//! [`Network::check_address`] for anyone who needs the reason.

use thiserror::Error;

use crate::config::{
    ADDRESS_LENGTH, ADDRESS_VERSION, CHECKSUM_LENGTH, MAINNET_CHAIN_ID, TESTNET_CHAIN_ID,
};
use crate::crypto::hash::chain_hash;

/// Why an address failed validation.
///
/// The variants follow the check order: length, version, chain id,
/// checksum. Base-58 decode failure precedes all of them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressDefect {
    /// The text is not valid base-58.
    #[error("address is not base-58")]
    Undecodable,

    /// The decoded byte count is not [`ADDRESS_LENGTH`].
    #[error("wrong address length: expected {expected} bytes, got {got}")]
    WrongLength { expected: usize, got: usize },

    /// The leading version byte does not match the network.
    #[error("wrong address version: expected {expected}, got {got}")]
    WrongVersion { expected: u8, got: u8 },

    /// The chain-id byte does not match the network.
    #[error("wrong chain id: expected {expected:#04x}, got {got:#04x}")]
    WrongChainId { expected: u8, got: u8 },

    /// The trailing checksum does not match the chain hash of the body.
    #[error("wrong address checksum")]
    BadChecksum,
}

/// A ledger network: the version and chain-id bytes every address on that
/// network must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    /// Leading version byte of account addresses.
    pub address_version: u8,
    /// Second byte of every address, identifying the chain.
    pub chain_id: u8,
}

impl Network {
    /// The production network (chain id `'M'`).
    pub fn mainnet() -> Self {
        Self {
            address_version: ADDRESS_VERSION,
            chain_id: MAINNET_CHAIN_ID,
        }
    }

    /// The test network (chain id `'T'`).
    pub fn testnet() -> Self {
        Self {
            address_version: ADDRESS_VERSION,
            chain_id: TESTNET_CHAIN_ID,
        }
    }

    /// Derive the base-58 account address for a public key.
    ///
    /// `version ‖ chain_id ‖ chain_hash(public_key)[0..20]`, then a 4-byte
    /// checksum of those 22 bytes. Deterministic and pure.
    pub fn address_from_public_key(&self, public_key: &[u8]) -> String {
        let content = chain_hash(public_key);
        let mut unhashed = Vec::with_capacity(ADDRESS_LENGTH);
        unhashed.push(self.address_version);
        unhashed.push(self.chain_id);
        unhashed.extend_from_slice(&content[..ADDRESS_LENGTH - 2 - CHECKSUM_LENGTH]);
        let check = checksum(&unhashed);
        unhashed.extend_from_slice(&check);
        bs58::encode(unhashed).into_string()
    }

    /// Validate an address against this network.
    ///
    /// Returns a uniform `false` on any defect; the first failing check is
    /// logged at warn level. Use [`check_address`](Self::check_address)
    /// when the typed reason matters.
    pub fn validate_address(&self, address: &str) -> bool {
        match self.check_address(address) {
            Ok(()) => true,
            Err(defect) => {
                tracing::warn!(address, %defect, "rejected address");
                false
            }
        }
    }

    /// The ordered validation predicate behind
    /// [`validate_address`](Self::validate_address).
    pub fn check_address(&self, address: &str) -> Result<(), AddressDefect> {
        let decoded = bs58::decode(address)
            .into_vec()
            .map_err(|_| AddressDefect::Undecodable)?;

        if decoded.len() != ADDRESS_LENGTH {
            return Err(AddressDefect::WrongLength {
                expected: ADDRESS_LENGTH,
                got: decoded.len(),
            });
        }
        if decoded[0] != self.address_version {
            return Err(AddressDefect::WrongVersion {
                expected: self.address_version,
                got: decoded[0],
            });
        }
        if decoded[1] != self.chain_id {
            return Err(AddressDefect::WrongChainId {
                expected: self.chain_id,
                got: decoded[1],
            });
        }

        let body = &decoded[..ADDRESS_LENGTH - CHECKSUM_LENGTH];
        let tail = &decoded[ADDRESS_LENGTH - CHECKSUM_LENGTH..];
        if tail != checksum(body).as_slice() {
            return Err(AddressDefect::BadChecksum);
        }
        Ok(())
    }
}

/// First [`CHECKSUM_LENGTH`] bytes of the chain hash.
pub(crate) fn checksum(data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = chain_hash(data);
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_key() -> [u8; 32] {
        let mut key = [0u8; 32];
        for (i, b) in key.iter_mut().enumerate() {
            *b = i as u8;
        }
        key
    }

    #[test]
    fn derived_address_validates() {
        let net = Network::mainnet();
        let addr = net.address_from_public_key(&fixture_key());
        assert!(net.validate_address(&addr));
    }

    #[test]
    fn derived_address_has_expected_layout() {
        // The concrete scenario: version 5, chain id 'M', fixed 32-byte key.
        let net = Network::mainnet();
        let addr = net.address_from_public_key(&fixture_key());
        let decoded = bs58::decode(&addr).into_vec().unwrap();

        assert_eq!(decoded.len(), 26);
        assert_eq!(decoded[0], 5);
        assert_eq!(decoded[1], b'M');
        assert_eq!(decoded[22..], chain_hash(&decoded[..22])[..4]);
    }

    #[test]
    fn last_byte_increment_invalidates() {
        let net = Network::mainnet();
        let addr = net.address_from_public_key(&fixture_key());
        let mut decoded = bs58::decode(&addr).into_vec().unwrap();
        let last = decoded.len() - 1;
        decoded[last] = decoded[last].wrapping_add(1);
        let corrupted = bs58::encode(decoded).into_string();
        assert!(!net.validate_address(&corrupted));
    }

    #[test]
    fn any_checksum_byte_flip_invalidates() {
        let net = Network::mainnet();
        let addr = net.address_from_public_key(&fixture_key());
        let decoded = bs58::decode(&addr).into_vec().unwrap();
        for i in 22..26 {
            let mut copy = decoded.clone();
            copy[i] ^= 0x01;
            let corrupted = bs58::encode(copy).into_string();
            assert!(!net.validate_address(&corrupted), "flip at byte {}", i);
        }
    }

    #[test]
    fn defects_reported_in_check_order() {
        let net = Network::mainnet();

        assert_eq!(
            net.check_address("not-base58-0OIl"),
            Err(AddressDefect::Undecodable)
        );

        let short = bs58::encode([5u8, b'M', 1, 2, 3]).into_string();
        assert!(matches!(
            net.check_address(&short),
            Err(AddressDefect::WrongLength { got: 5, .. })
        ));

        // Right length, wrong version: length passes first, version trips.
        let mut raw = vec![9u8; 26];
        raw[1] = b'M';
        let wrong_version = bs58::encode(&raw).into_string();
        assert!(matches!(
            net.check_address(&wrong_version),
            Err(AddressDefect::WrongVersion { got: 9, .. })
        ));

        raw[0] = 5;
        raw[1] = b'T';
        let wrong_chain = bs58::encode(&raw).into_string();
        assert!(matches!(
            net.check_address(&wrong_chain),
            Err(AddressDefect::WrongChainId { got: b'T', .. })
        ));

        raw[1] = b'M';
        let bad_checksum = bs58::encode(&raw).into_string();
        assert_eq!(
            net.check_address(&bad_checksum),
            Err(AddressDefect::BadChecksum)
        );
    }

    #[test]
    fn testnet_address_rejected_on_mainnet() {
        let testnet_addr = Network::testnet().address_from_public_key(&fixture_key());
        assert!(Network::testnet().validate_address(&testnet_addr));
        assert!(!Network::mainnet().validate_address(&testnet_addr));
    }

    #[test]
    fn derivation_is_deterministic() {
        let net = Network::mainnet();
        assert_eq!(
            net.address_from_public_key(&fixture_key()),
            net.address_from_public_key(&fixture_key())
        );
    }
}
