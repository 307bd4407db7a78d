//! The contract container codec.
//!
//! A contract is a fixed sequence of sections:
//!
//! ```text
//! language code    4 bytes
//! language version 4 bytes
//! trigger          array block — exactly one sub-array (the on-init trigger)
//! descriptor       array block — one sub-array per callable function
//! state variables  array block — one sub-array per declared variable
//! textual          remainder    — sub-arrays to end of input
//! ```
//!
//! An *array block* is a `u16` big-endian header declaring the payload byte
//! length, followed by sub-arrays that are each `u16`-length-prefixed. The
//! sub-arrays must consume the declared payload exactly; a block whose last
//! sub-array overruns its frame, or that reads past the end of the input,
//! is malformed. Decode never guesses.
//!
//! `encode` is the exact inverse: for any container produced by `decode`,
//! re-encoding reproduces the input byte for byte.

use thiserror::Error;

use crate::config::{LANGUAGE_CODE_LENGTH, LANGUAGE_VERSION_LENGTH};

/// A structural defect in contract bytecode. Unrecoverable: the current
/// decode or decompile call aborts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A read would pass the end of the input.
    #[error("container truncated: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Sub-arrays did not consume an array block's declared length exactly.
    #[error("array block length mismatch: declared {declared} bytes, sub-arrays consume {consumed}")]
    BlockLengthMismatch { declared: usize, consumed: usize },

    /// A sub-array is too long for its `u16` length prefix.
    #[error("sub-array of {len} bytes exceeds the u16 length prefix")]
    SubArrayTooLong { len: usize },

    /// An array block's payload is too long for its `u16` header.
    #[error("array block of {len} bytes exceeds the u16 header")]
    BlockTooLong { len: usize },

    /// An instruction byte is not in the opcode catalog.
    #[error("unknown opcode tag {tag:#04x} at instruction {index}")]
    UnknownOpcode { tag: u8, index: usize },

    /// An opcode's sub-function byte is not in the catalog.
    #[error("unknown {family} sub-function tag {tag}")]
    UnknownFunctionTag { family: &'static str, tag: u8 },

    /// The instruction stream ended inside an instruction's operands.
    #[error("instruction stream ends inside the operands of {opcode}")]
    TruncatedInstruction { opcode: &'static str },

    /// The textual section does not hold the three expected sub-arrays.
    #[error("textual section must hold {expected} sub-arrays, found {found}")]
    TextualShape { expected: usize, found: usize },

    /// A textual entry is not valid UTF-8.
    #[error("textual entry is not valid utf-8")]
    BadTextual,
}

/// A decoded contract container. Sub-arrays are kept as raw bytes; the
/// decompiler interprets trigger/descriptor entries as instruction streams
/// and the textual entries as name tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractContainer {
    pub language_code: [u8; 4],
    pub language_version: [u8; 4],
    /// Trigger entries. The on-init trigger is the only one defined today.
    pub triggers: Vec<Vec<u8>>,
    /// One instruction stream per callable function.
    pub descriptors: Vec<Vec<u8>>,
    /// One declaration per state variable: index byte, type tag.
    pub state_variables: Vec<Vec<u8>>,
    /// Name tables consumed only by the decompiler.
    pub textual: Vec<Vec<u8>>,
}

impl ContractContainer {
    /// Parse raw contract bytecode.
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut reader = Reader::new(bytes);

        let language_code = reader.take_fixed::<LANGUAGE_CODE_LENGTH>()?;
        let language_version = reader.take_fixed::<LANGUAGE_VERSION_LENGTH>()?;
        let triggers = reader.read_block()?;
        let descriptors = reader.read_block()?;
        let state_variables = reader.read_block()?;
        let textual = reader.read_remainder()?;

        Ok(Self {
            language_code,
            language_version,
            triggers,
            descriptors,
            state_variables,
            textual,
        })
    }

    /// Serialize back to raw bytecode. Inverse of [`decode`](Self::decode).
    pub fn encode(&self) -> Result<Vec<u8>, FormatError> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.language_code);
        buf.extend_from_slice(&self.language_version);
        write_block(&mut buf, &self.triggers)?;
        write_block(&mut buf, &self.descriptors)?;
        write_block(&mut buf, &self.state_variables)?;
        for entry in &self.textual {
            write_prefixed(&mut buf, entry)?;
        }
        Ok(buf)
    }
}

/// Append `bytes` with a `u16` big-endian length prefix.
pub(crate) fn write_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) -> Result<(), FormatError> {
    let len = u16::try_from(bytes.len())
        .map_err(|_| FormatError::SubArrayTooLong { len: bytes.len() })?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Append an array block: `u16` payload-length header, then each sub-array
/// length-prefixed.
pub(crate) fn write_block(buf: &mut Vec<u8>, arrays: &[Vec<u8>]) -> Result<(), FormatError> {
    let mut payload = Vec::new();
    for array in arrays {
        write_prefixed(&mut payload, array)?;
    }
    let len =
        u16::try_from(payload.len()).map_err(|_| FormatError::BlockTooLong { len: payload.len() })?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(&payload);
    Ok(())
}

/// Split a byte region into `u16`-prefixed sub-arrays, consuming it
/// exactly.
pub(crate) fn read_sub_arrays(region: &[u8]) -> Result<Vec<Vec<u8>>, FormatError> {
    let declared = region.len();
    let mut arrays = Vec::new();
    let mut pos = 0usize;
    while pos < declared {
        if pos + 2 > declared {
            return Err(FormatError::BlockLengthMismatch {
                declared,
                consumed: pos + 2,
            });
        }
        let len = u16::from_be_bytes([region[pos], region[pos + 1]]) as usize;
        pos += 2;
        if pos + len > declared {
            return Err(FormatError::BlockLengthMismatch {
                declared,
                consumed: pos + len,
            });
        }
        arrays.push(region[pos..pos + len].to_vec());
        pos += len;
    }
    Ok(arrays)
}

/// Sequential reader over raw bytecode with running-offset bookkeeping.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        if self.pos + n > self.bytes.len() {
            return Err(FormatError::Truncated {
                offset: self.pos,
                needed: n,
                available: self.bytes.len() - self.pos,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_fixed<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let slice = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn read_u16(&mut self) -> Result<u16, FormatError> {
        let slice = self.take(2)?;
        Ok(u16::from_be_bytes([slice[0], slice[1]]))
    }

    /// One framed array block: header, then sub-arrays consuming the
    /// declared payload exactly.
    fn read_block(&mut self) -> Result<Vec<Vec<u8>>, FormatError> {
        let declared = self.read_u16()? as usize;
        let payload = self.take(declared)?;
        read_sub_arrays(payload)
    }

    /// The unframed remainder of the input as sub-arrays.
    fn read_remainder(&mut self) -> Result<Vec<Vec<u8>>, FormatError> {
        let rest = &self.bytes[self.pos..];
        self.pos = self.bytes.len();
        read_sub_arrays(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::builder::token_contract;

    fn sample() -> ContractContainer {
        token_contract(true)
    }

    #[test]
    fn roundtrip_container_to_bytes_and_back() {
        let container = sample();
        let bytes = container.encode().unwrap();
        let decoded = ContractContainer::decode(&bytes).unwrap();
        assert_eq!(container, decoded);
    }

    #[test]
    fn roundtrip_bytes_to_container_and_back() {
        let bytes = sample().encode().unwrap();
        let reencoded = ContractContainer::decode(&bytes).unwrap().encode().unwrap();
        assert_eq!(bytes, reencoded);
    }

    #[test]
    fn no_split_variant_also_roundtrips() {
        let container = token_contract(false);
        let bytes = container.encode().unwrap();
        assert_eq!(ContractContainer::decode(&bytes).unwrap(), container);
    }

    #[test]
    fn truncated_header_rejected() {
        let err = ContractContainer::decode(&[0x76, 0x64]).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { .. }));
    }

    #[test]
    fn block_reading_past_input_rejected() {
        // Valid 4+4 header, then a trigger block claiming 100 payload bytes
        // with only 2 present.
        let mut bytes = vec![0u8; 8];
        bytes.extend_from_slice(&100u16.to_be_bytes());
        bytes.extend_from_slice(&[0, 0]);
        let err = ContractContainer::decode(&bytes).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { .. }));
    }

    #[test]
    fn sub_array_overrunning_block_rejected() {
        // Block declares 4 payload bytes; its single sub-array claims 7.
        let mut bytes = vec![0u8; 8];
        bytes.extend_from_slice(&4u16.to_be_bytes());
        bytes.extend_from_slice(&7u16.to_be_bytes());
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let err = ContractContainer::decode(&bytes).unwrap_err();
        assert_eq!(
            err,
            FormatError::BlockLengthMismatch {
                declared: 4,
                consumed: 9
            }
        );
    }

    #[test]
    fn dangling_prefix_byte_in_block_rejected() {
        // Block declares 3 payload bytes: one empty sub-array (2 bytes of
        // prefix) plus one stray byte that cannot start a prefix.
        let mut bytes = vec![0u8; 8];
        bytes.extend_from_slice(&3u16.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes());
        bytes.push(0x01);
        let err = ContractContainer::decode(&bytes).unwrap_err();
        assert!(matches!(err, FormatError::BlockLengthMismatch { .. }));
    }

    #[test]
    fn tampered_block_length_never_decodes_silently() {
        let bytes = sample().encode().unwrap();
        // The trigger block header sits right after the 8-byte language
        // fields. Shrink the declared length by one.
        let declared = u16::from_be_bytes([bytes[8], bytes[9]]);
        let mut tampered = bytes.clone();
        tampered[8..10].copy_from_slice(&(declared - 1).to_be_bytes());
        assert!(ContractContainer::decode(&tampered).is_err());
    }

    #[test]
    fn empty_blocks_roundtrip() {
        let container = ContractContainer {
            language_code: *b"vdds",
            language_version: [0, 0, 0, 1],
            triggers: vec![],
            descriptors: vec![],
            state_variables: vec![],
            textual: vec![],
        };
        let bytes = container.encode().unwrap();
        // 4 + 4 + three empty block headers.
        assert_eq!(bytes.len(), 8 + 6);
        assert_eq!(ContractContainer::decode(&bytes).unwrap(), container);
    }

    #[test]
    fn oversized_sub_array_rejected_on_encode() {
        let container = ContractContainer {
            language_code: *b"vdds",
            language_version: [0, 0, 0, 1],
            triggers: vec![vec![0u8; usize::from(u16::MAX) + 1]],
            descriptors: vec![],
            state_variables: vec![],
            textual: vec![],
        };
        assert!(matches!(
            container.encode(),
            Err(FormatError::SubArrayTooLong { .. })
        ));
    }
}
