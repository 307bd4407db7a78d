//! # Transaction Encoding
//!
//! Construction and signing of the two contract transaction kinds.
//!
//! ```text
//! data_entry.rs — Typed execution arguments and the data-stack serializer.
//! register.rs   — Contract registration (tx type 8).
//! execute.rs    — Contract function execution (tx type 9).
//! broadcast.rs  — Broadcast records, wire field names, transport seam.
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** — assemble the fields with a builder.
//! 2. **Sign** — `sign()` runs the ordered preconditions, lays out the
//!    canonical bytes, and signs them in one atomic step.
//! 3. **Broadcast** — hand the signed record to a [`broadcast::Transport`].
//!
//! Precondition failures are detected before any byte construction and
//! leave nothing behind; there is no partially-built transaction state.

pub mod broadcast;
pub mod data_entry;
pub mod execute;
pub mod register;

pub use broadcast::{SignedExecuteContract, SignedRegisterContract, Transport, TransportError};
pub use data_entry::{serialize_data, DataEntry, DataError};
pub use execute::ExecuteContractBuilder;
pub use register::RegisterContractBuilder;

use thiserror::Error;

use crate::account::BalanceError;

// ---------------------------------------------------------------------------
// Encoder configuration
// ---------------------------------------------------------------------------

/// Whether builders may consult the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Balance preconditions are enforced through the [`crate::account::BalanceSource`].
    Online,
    /// Balance preconditions are skipped; everything else still applies.
    Offline,
}

/// Explicit configuration threaded into every build call; there is no
/// process-wide mode state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    pub mode: Mode,
    /// Enforce the single network-accepted fee scale. Leave on unless the
    /// network governance changes the accepted value mid-flight.
    pub check_fee_scale: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Online,
            check_fee_scale: true,
        }
    }
}

impl EncoderConfig {
    /// Online with fee-scale checking, the production setting.
    pub fn online() -> Self {
        Self::default()
    }

    /// Offline: skip the balance query, keep every local check.
    pub fn offline() -> Self {
        Self {
            mode: Mode::Offline,
            check_fee_scale: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A precondition or structural failure while building a transaction.
///
/// Every variant is detected before the payload bytes exist; a failed
/// build has no side effects and nothing to roll back.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The account is watch-only.
    #[error("signing key required")]
    MissingSigningKey,

    /// The contract text cannot encode even a minimum-size contract.
    #[error("contract text must be at least {min} characters, got {got}")]
    ContractTooShort { min: usize, got: usize },

    /// The contract text is not base-58.
    #[error("contract is not base-58")]
    ContractUndecodable,

    /// The decoded contract does not fit its `u16` length field.
    #[error("contract of {len} bytes exceeds the u16 length field")]
    ContractTooLarge { len: usize },

    /// The fee is below the floor for this transaction kind.
    #[error("transaction fee must be >= {minimum}, got {got}")]
    FeeBelowMinimum { minimum: u64, got: u64 },

    /// The description or attachment exceeds the network cap.
    #[error("attachment length must be <= {max} bytes, got {got}")]
    AttachmentTooLarge { max: usize, got: usize },

    /// The fee scale is not the single accepted value.
    #[error("wrong fee scale: must be {expected}, got {got}")]
    WrongFeeScale { expected: u16, got: u16 },

    /// The contract id is missing or not decodable base-58.
    #[error("contract id required and must be base-58")]
    InvalidContractId,

    /// The serialized data stack does not fit its `u16` length field.
    #[error("data stack of {len} bytes exceeds the u16 length field")]
    DataStackTooLarge { len: usize },

    /// The account balance does not cover the fee.
    #[error("insufficient balance: {balance} available, {fee} required")]
    InsufficientBalance { balance: u64, fee: u64 },

    /// The balance query itself failed. Never swallowed into success.
    #[error(transparent)]
    Balance(#[from] BalanceError),

    /// A data-stack entry could not be serialized.
    #[error(transparent)]
    DataStack(#[from] DataError),
}

/// Current time in nanoseconds since the epoch, the timestamp unit of the
/// wire format. Saturates at `i64::MAX` nanoseconds (year 2262).
pub(crate) fn now_nanos() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or(i64::MAX) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_online_and_strict() {
        let config = EncoderConfig::default();
        assert_eq!(config.mode, Mode::Online);
        assert!(config.check_fee_scale);
    }

    #[test]
    fn offline_config_keeps_fee_scale_check() {
        let config = EncoderConfig::offline();
        assert_eq!(config.mode, Mode::Offline);
        assert!(config.check_fee_scale);
    }

    #[test]
    fn now_nanos_is_monotonic_enough() {
        let a = now_nanos();
        let b = now_nanos();
        assert!(b >= a);
        // Sanity: we are well past 2020 in nanoseconds.
        assert!(a > 1_577_836_800_000_000_000);
    }
}
