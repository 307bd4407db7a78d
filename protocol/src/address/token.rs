//! Token identifier derivation.
//!
//! A token id names one token type issued by a contract: the contract id's
//! content bytes, reframed under the token version byte with a big-endian
//! index appended, then checksummed like an address.

use super::codec::{checksum, AddressDefect};
use crate::config::{CHECKSUM_LENGTH, TOKEN_ADDRESS_VERSION};

/// Derive the base-58 token id for `(contract_id, index)`.
///
/// The contract id is decoded, stripped of its leading version byte and
/// trailing checksum, and rebuilt as
/// `TOKEN_ADDRESS_VERSION ‖ content ‖ index(u32 BE) ‖ checksum`.
///
/// Pure: identical inputs always produce identical text.
///
/// # Errors
///
/// [`AddressDefect::Undecodable`] when the contract id is not base-58;
/// [`AddressDefect::WrongLength`] when it is too short to hold a version
/// byte and a checksum.
pub fn token_id(contract_id: &str, index: u32) -> Result<String, AddressDefect> {
    let decoded = bs58::decode(contract_id)
        .into_vec()
        .map_err(|_| AddressDefect::Undecodable)?;

    if decoded.len() <= 1 + CHECKSUM_LENGTH {
        return Err(AddressDefect::WrongLength {
            expected: 1 + CHECKSUM_LENGTH + 1,
            got: decoded.len(),
        });
    }

    let content = &decoded[1..decoded.len() - CHECKSUM_LENGTH];
    let mut payload = Vec::with_capacity(1 + content.len() + 4 + CHECKSUM_LENGTH);
    payload.push(TOKEN_ADDRESS_VERSION);
    payload.extend_from_slice(content);
    payload.extend_from_slice(&index.to_be_bytes());
    let check = checksum(&payload);
    payload.extend_from_slice(&check);
    Ok(bs58::encode(payload).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Network;
    use crate::crypto::chain_hash;

    fn contract_id_fixture() -> String {
        // A contract id has the same 26-byte shape as an account address.
        Network::mainnet().address_from_public_key(&[0x11u8; 32])
    }

    #[test]
    fn token_id_is_deterministic() {
        let cid = contract_id_fixture();
        assert_eq!(token_id(&cid, 0).unwrap(), token_id(&cid, 0).unwrap());
    }

    #[test]
    fn adjacent_indices_differ_in_text_and_checksum() {
        let cid = contract_id_fixture();
        let a = token_id(&cid, 0).unwrap();
        let b = token_id(&cid, 1).unwrap();
        assert_ne!(a, b);

        let raw_a = bs58::decode(&a).into_vec().unwrap();
        let raw_b = bs58::decode(&b).into_vec().unwrap();
        assert_ne!(
            raw_a[raw_a.len() - CHECKSUM_LENGTH..],
            raw_b[raw_b.len() - CHECKSUM_LENGTH..]
        );
    }

    #[test]
    fn token_id_layout() {
        let cid = contract_id_fixture();
        let cid_raw = bs58::decode(&cid).into_vec().unwrap();
        let raw = bs58::decode(token_id(&cid, 7).unwrap()).into_vec().unwrap();

        // version ‖ content(21) ‖ index(4) ‖ checksum(4)
        assert_eq!(raw.len(), 1 + (cid_raw.len() - 5) + 4 + 4);
        assert_eq!(raw[0], TOKEN_ADDRESS_VERSION);
        assert_eq!(raw[1..cid_raw.len() - 4], cid_raw[1..cid_raw.len() - 4]);
        assert_eq!(raw[raw.len() - 8..raw.len() - 4], 7u32.to_be_bytes());
        let body = &raw[..raw.len() - 4];
        assert_eq!(raw[raw.len() - 4..], chain_hash(body)[..4]);
    }

    #[test]
    fn undecodable_contract_id_rejected() {
        assert_eq!(token_id("IlO0", 0), Err(AddressDefect::Undecodable));
    }

    #[test]
    fn tiny_contract_id_rejected() {
        let tiny = bs58::encode([1u8, 2, 3]).into_string();
        assert!(matches!(
            token_id(&tiny, 0),
            Err(AddressDefect::WrongLength { .. })
        ));
    }
}
