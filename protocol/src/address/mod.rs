//! # Addresses & Token Identifiers
//!
//! Base-58 address derivation and validation, plus the token-id scheme that
//! names individual token types issued by a contract.
//!
//! An address is 26 raw bytes (version, chain id, 20-byte content hash,
//! 4-byte checksum), always carried as base-58 text. A token id has the
//! same shape but swaps the version byte, splices in a big-endian index,
//! and recomputes the checksum.

pub mod codec;
pub mod token;

pub use codec::{AddressDefect, Network};
pub use token::token_id;
