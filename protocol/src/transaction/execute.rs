//! Contract function execution (transaction type 9).
//!
//! The canonical payload, all integers big-endian:
//!
//! ```text
//! txType(1) ‖ contractId(raw, verbatim) ‖ functionIndex(2)
//!           ‖ len(dataStack)(2) ‖ dataStack
//!           ‖ len(attachment)(2) ‖ attachment
//!           ‖ fee(8) ‖ feeScale(2) ‖ timestamp(8)
//! ```
//!
//! The contract id goes in whole (version byte, content, and checksum),
//! with no length prefix and no stripping.

use crate::account::{Account, BalanceSource};
use crate::config::{
    DEFAULT_FEE_SCALE, EXECUTE_CONTRACT_TX_TYPE, MAX_ATTACHMENT_SIZE, MIN_EXECUTE_CONTRACT_FEE,
};
use crate::transaction::broadcast::SignedExecuteContract;
use crate::transaction::data_entry::{serialize_data, DataEntry};
use crate::transaction::{now_nanos, BuildError, EncoderConfig, Mode};

/// Builder for a contract function execution.
///
/// Defaults: minimum execution fee, the accepted fee scale, timestamp taken
/// from the clock at signing time.
#[derive(Debug, Clone)]
pub struct ExecuteContractBuilder {
    contract_id: String,
    function_index: u16,
    data_stack: Vec<DataEntry>,
    attachment: String,
    fee: u64,
    fee_scale: u16,
    timestamp: u64,
}

impl ExecuteContractBuilder {
    /// Start an execution of `function_index` on the contract with the
    /// given base-58 id.
    pub fn new(contract_id: impl Into<String>, function_index: u16) -> Self {
        Self {
            contract_id: contract_id.into(),
            function_index,
            data_stack: Vec::new(),
            attachment: String::new(),
            fee: MIN_EXECUTE_CONTRACT_FEE,
            fee_scale: DEFAULT_FEE_SCALE,
            timestamp: 0,
        }
    }

    /// Arguments for the called function.
    pub fn data_stack(mut self, entries: Vec<DataEntry>) -> Self {
        self.data_stack = entries;
        self
    }

    /// Free-form attachment (capped at [`MAX_ATTACHMENT_SIZE`] bytes).
    pub fn attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = attachment.into();
        self
    }

    /// Fee in sparks. Must meet [`MIN_EXECUTE_CONTRACT_FEE`].
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    pub fn fee_scale(mut self, fee_scale: u16) -> Self {
        self.fee_scale = fee_scale;
        self
    }

    /// Explicit timestamp in nanoseconds. Zero (the default) means "now at
    /// signing time".
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Run the preconditions, lay out the payload, sign it, and produce the
    /// broadcast record.
    ///
    /// Preconditions, checked in order:
    /// 1. the account can sign;
    /// 2. the contract id is present and decodes;
    /// 3. the fee meets the execution floor;
    /// 4. the attachment fits the cap;
    /// 5. the fee scale is the accepted value (when checking is enabled);
    /// 6. online only: the balance covers the fee.
    pub fn sign(
        &self,
        account: &Account,
        balance: &dyn BalanceSource,
        config: &EncoderConfig,
    ) -> Result<SignedExecuteContract, BuildError> {
        let keypair = account.keypair().ok_or(BuildError::MissingSigningKey)?;

        if self.contract_id.is_empty() {
            return Err(BuildError::InvalidContractId);
        }
        let contract_id_bytes = bs58::decode(&self.contract_id)
            .into_vec()
            .map_err(|_| BuildError::InvalidContractId)?;

        if self.fee < MIN_EXECUTE_CONTRACT_FEE {
            return Err(BuildError::FeeBelowMinimum {
                minimum: MIN_EXECUTE_CONTRACT_FEE,
                got: self.fee,
            });
        }
        if self.attachment.len() > MAX_ATTACHMENT_SIZE {
            return Err(BuildError::AttachmentTooLarge {
                max: MAX_ATTACHMENT_SIZE,
                got: self.attachment.len(),
            });
        }
        if config.check_fee_scale && self.fee_scale != DEFAULT_FEE_SCALE {
            return Err(BuildError::WrongFeeScale {
                expected: DEFAULT_FEE_SCALE,
                got: self.fee_scale,
            });
        }
        if config.mode == Mode::Online {
            let available = balance.balance()?;
            if available < self.fee {
                return Err(BuildError::InsufficientBalance {
                    balance: available,
                    fee: self.fee,
                });
            }
        }

        let data_stack_bytes = serialize_data(&self.data_stack)?;
        if data_stack_bytes.len() > usize::from(u16::MAX) {
            return Err(BuildError::DataStackTooLarge {
                len: data_stack_bytes.len(),
            });
        }
        let timestamp = if self.timestamp == 0 {
            now_nanos()
        } else {
            self.timestamp
        };

        let attachment_bytes = self.attachment.as_bytes();
        let mut payload = Vec::with_capacity(
            1 + contract_id_bytes.len() + 2 + 2 + data_stack_bytes.len() + 2
                + attachment_bytes.len()
                + 8 + 2 + 8,
        );
        payload.push(EXECUTE_CONTRACT_TX_TYPE);
        payload.extend_from_slice(&contract_id_bytes);
        payload.extend_from_slice(&self.function_index.to_be_bytes());
        payload.extend_from_slice(&(data_stack_bytes.len() as u16).to_be_bytes());
        payload.extend_from_slice(&data_stack_bytes);
        payload.extend_from_slice(&(attachment_bytes.len() as u16).to_be_bytes());
        payload.extend_from_slice(attachment_bytes);
        payload.extend_from_slice(&self.fee.to_be_bytes());
        payload.extend_from_slice(&self.fee_scale.to_be_bytes());
        payload.extend_from_slice(&timestamp.to_be_bytes());

        let signature = keypair.sign(&payload);
        tracing::debug!(
            function_index = self.function_index,
            fee = self.fee,
            timestamp,
            "signed contract execution"
        );

        Ok(SignedExecuteContract {
            sender_public_key: account.public_key().to_base58(),
            contract_id: self.contract_id.clone(),
            function_index: self.function_index,
            function_data: bs58::encode(&data_stack_bytes).into_string(),
            attachment: bs58::encode(attachment_bytes).into_string(),
            fee: self.fee,
            fee_scale: self.fee_scale,
            timestamp,
            signature: signature.to_base58(),
        })
    }
}
