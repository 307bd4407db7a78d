//! Typed execution arguments: the data stack.
//!
//! Contract initializers and functions take their arguments as a serialized
//! *data stack*: a `u16` big-endian entry count followed by tagged entries.
//! The tag byte is the catalog value type; the payload width depends on the
//! tag:
//!
//! ```text
//! publicKey        32 raw bytes
//! address          26 raw bytes (base-58 decoded)
//! amount           u64 big-endian
//! int32            i32 big-endian
//! shortText        u16 length ‖ utf-8 bytes
//! contractAccount  raw bytes (base-58 decoded contract id)
//! ```

use thiserror::Error;

use crate::contract::opcodes::ValueType;
use crate::crypto::VelaPublicKey;

/// A data-stack entry could not be serialized.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    /// An address or contract-account entry is not base-58.
    #[error("data entry is not a base-58 identifier: {0}")]
    BadIdentifier(String),

    /// A short text exceeds its `u16` length prefix.
    #[error("short text of {len} bytes exceeds the u16 length prefix")]
    TextTooLong { len: usize },

    /// More entries than the `u16` count field can carry.
    #[error("too many data entries: {0}")]
    TooManyEntries(usize),
}

/// One typed execution argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEntry {
    PublicKey(VelaPublicKey),
    /// A base-58 account address.
    Address(String),
    Amount(u64),
    Int32(i32),
    ShortText(String),
    /// A base-58 contract id.
    ContractAccount(String),
}

impl DataEntry {
    /// The catalog type tag leading this entry on the wire.
    pub fn type_tag(&self) -> ValueType {
        match self {
            Self::PublicKey(_) => ValueType::PublicKey,
            Self::Address(_) => ValueType::Address,
            Self::Amount(_) => ValueType::Amount,
            Self::Int32(_) => ValueType::Int32,
            Self::ShortText(_) => ValueType::ShortText,
            Self::ContractAccount(_) => ValueType::ContractAccount,
        }
    }

    fn write(&self, buf: &mut Vec<u8>) -> Result<(), DataError> {
        buf.push(self.type_tag() as u8);
        match self {
            Self::PublicKey(pk) => buf.extend_from_slice(pk.as_bytes()),
            Self::Address(text) | Self::ContractAccount(text) => {
                let raw = bs58::decode(text)
                    .into_vec()
                    .map_err(|_| DataError::BadIdentifier(text.clone()))?;
                buf.extend_from_slice(&raw);
            }
            Self::Amount(value) => buf.extend_from_slice(&value.to_be_bytes()),
            Self::Int32(value) => buf.extend_from_slice(&value.to_be_bytes()),
            Self::ShortText(text) => {
                let len = u16::try_from(text.len())
                    .map_err(|_| DataError::TextTooLong { len: text.len() })?;
                buf.extend_from_slice(&len.to_be_bytes());
                buf.extend_from_slice(text.as_bytes());
            }
        }
        Ok(())
    }
}

/// Serialize a data stack: `u16` entry count, then each tagged entry.
pub fn serialize_data(entries: &[DataEntry]) -> Result<Vec<u8>, DataError> {
    let count =
        u16::try_from(entries.len()).map_err(|_| DataError::TooManyEntries(entries.len()))?;
    let mut buf = Vec::new();
    buf.extend_from_slice(&count.to_be_bytes());
    for entry in entries {
        entry.write(&mut buf)?;
    }
    Ok(buf)
}
