//! # Protocol Configuration & Constants
//!
//! Every magic number in the Vela client lives here. The byte-layout
//! constants are consensus-critical: they must match the node bit for bit,
//! so treat any edit to this file as a wire-format change.

// ---------------------------------------------------------------------------
// Denomination
// ---------------------------------------------------------------------------

/// Smallest indivisible unit of the native coin. 1 VELA = 10^8 sparks.
pub const UNIT: u64 = 100_000_000;

/// Default fee for plain transactions, in sparks (0.1 VELA).
pub const DEFAULT_TX_FEE: u64 = UNIT / 10;

/// The single fee-scale value the network currently accepts.
pub const DEFAULT_FEE_SCALE: u16 = 100;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Chain-id byte embedded in every mainnet address.
pub const MAINNET_CHAIN_ID: u8 = b'M';

/// Chain-id byte embedded in every testnet address.
pub const TESTNET_CHAIN_ID: u8 = b'T';

/// Version byte leading every account address.
pub const ADDRESS_VERSION: u8 = 5;

/// Version byte leading every token identifier.
pub const TOKEN_ADDRESS_VERSION: u8 = 132;

// ---------------------------------------------------------------------------
// Address Layout
// ---------------------------------------------------------------------------

/// Truncated chain-hash length appended to addresses and token ids.
pub const CHECKSUM_LENGTH: usize = 4;

/// Length of the public-key content hash carried in an address.
pub const ADDRESS_HASH_LENGTH: usize = 20;

/// Raw byte length of a decoded address:
/// version (1) + chain id (1) + content hash (20) + checksum (4).
pub const ADDRESS_LENGTH: usize = 1 + 1 + ADDRESS_HASH_LENGTH + CHECKSUM_LENGTH;

/// Big-endian byte width of the token index inside a token id.
pub const TOKEN_INDEX_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// Transaction Types & Fees
// ---------------------------------------------------------------------------

/// Transaction type tag for contract registration.
pub const REGISTER_CONTRACT_TX_TYPE: u8 = 8;

/// Transaction type tag for contract function execution.
pub const EXECUTE_CONTRACT_TX_TYPE: u8 = 9;

/// Minimum fee for registering a contract (100 VELA).
pub const MIN_REGISTER_CONTRACT_FEE: u64 = 100 * UNIT;

/// Minimum fee for executing a contract function (0.3 VELA).
pub const MIN_EXECUTE_CONTRACT_FEE: u64 = 30_000_000;

/// Maximum byte length of a transaction description or attachment.
pub const MAX_ATTACHMENT_SIZE: usize = 140;

// ---------------------------------------------------------------------------
// Contract Container
// ---------------------------------------------------------------------------

/// Fixed byte width of the language-code field.
pub const LANGUAGE_CODE_LENGTH: usize = 4;

/// Fixed byte width of the language-version field.
pub const LANGUAGE_VERSION_LENGTH: usize = 4;

/// Smallest raw contract the node will accept, in bytes.
pub const MIN_CONTRACT_BYTE_SIZE: usize = 8;

/// Smallest base-58 text length that can encode
/// [`MIN_CONTRACT_BYTE_SIZE`] raw bytes.
///
/// `ceil(log(256) / log(58) * MIN_CONTRACT_BYTE_SIZE)`. The registration
/// precondition checks the *text* it was handed, before decoding.
pub fn min_contract_string_size() -> usize {
    let per_byte = (256f64).ln() / (58f64).ln();
    (per_byte * MIN_CONTRACT_BYTE_SIZE as f64).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_ids_are_distinct() {
        assert_ne!(MAINNET_CHAIN_ID, TESTNET_CHAIN_ID);
    }

    #[test]
    fn address_length_adds_up() {
        assert_eq!(ADDRESS_LENGTH, 26);
    }

    #[test]
    fn address_and_token_versions_differ() {
        assert_ne!(ADDRESS_VERSION, TOKEN_ADDRESS_VERSION);
    }

    #[test]
    fn fee_floors_sanity() {
        // Registration carries a much higher floor than execution.
        assert!(MIN_REGISTER_CONTRACT_FEE > MIN_EXECUTE_CONTRACT_FEE);
        assert!(MIN_EXECUTE_CONTRACT_FEE > 0);
        assert_eq!(MIN_REGISTER_CONTRACT_FEE % UNIT, 0);
    }

    #[test]
    fn tx_type_tags_are_distinct() {
        assert_ne!(REGISTER_CONTRACT_TX_TYPE, EXECUTE_CONTRACT_TX_TYPE);
    }

    #[test]
    fn min_contract_string_size_matches_byte_floor() {
        // 8 raw bytes need ceil(8 * log58(256)) = 11 base-58 characters.
        assert_eq!(min_contract_string_size(), 11);
    }
}
