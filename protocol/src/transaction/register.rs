//! Contract registration (transaction type 8).
//!
//! The canonical payload, all integers big-endian:
//!
//! ```text
//! txType(1) ‖ len(contract)(2) ‖ contract
//!           ‖ len(dataStack)(2) ‖ dataStack
//!           ‖ len(description)(2) ‖ description
//!           ‖ fee(8) ‖ feeScale(2) ‖ timestamp(8)
//! ```
//!
//! The signature covers exactly these bytes. The broadcast record carries
//! the text-encoded fields, never the raw payload.

use crate::account::{Account, BalanceSource};
use crate::config::{
    min_contract_string_size, DEFAULT_FEE_SCALE, MAX_ATTACHMENT_SIZE, MIN_REGISTER_CONTRACT_FEE,
    REGISTER_CONTRACT_TX_TYPE,
};
use crate::transaction::broadcast::SignedRegisterContract;
use crate::transaction::data_entry::{serialize_data, DataEntry};
use crate::transaction::{now_nanos, BuildError, EncoderConfig, Mode};

/// Builder for a contract registration.
///
/// Defaults: minimum registration fee, the accepted fee scale, timestamp
/// taken from the clock at signing time.
///
/// # Example
///
/// ```no_run
/// use vela_protocol::account::{Account, FixedBalance};
/// use vela_protocol::crypto::VelaKeypair;
/// use vela_protocol::transaction::{EncoderConfig, RegisterContractBuilder};
///
/// let account = Account::from_keypair(VelaKeypair::generate());
/// let record = RegisterContractBuilder::new("4Qgfi31k6qfLyTguJqthsHp6HT...")
///     .description("my token")
///     .sign(&account, &FixedBalance(u64::MAX), &EncoderConfig::offline())
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RegisterContractBuilder {
    contract: String,
    data_stack: Vec<DataEntry>,
    description: String,
    fee: u64,
    fee_scale: u16,
    timestamp: u64,
}

impl RegisterContractBuilder {
    /// Start a registration for base-58 contract bytecode.
    pub fn new(contract: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            data_stack: Vec::new(),
            description: String::new(),
            fee: MIN_REGISTER_CONTRACT_FEE,
            fee_scale: DEFAULT_FEE_SCALE,
            timestamp: 0,
        }
    }

    /// Initializer arguments for the on-init trigger.
    pub fn data_stack(mut self, entries: Vec<DataEntry>) -> Self {
        self.data_stack = entries;
        self
    }

    /// Human-readable registration description (capped at
    /// [`MAX_ATTACHMENT_SIZE`] bytes).
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Fee in sparks. Must meet [`MIN_REGISTER_CONTRACT_FEE`].
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
    /// broadcast record. One atomic step; a failed call has no effect.
    ///
    /// Preconditions, checked in order:
    /// 1. the account can sign;
    /// 2. the contract text can hold a minimum-size contract and decodes;
    /// 3. the fee meets the registration floor;
    /// 4. the description fits the attachment cap;
    /// 5. the fee scale is the accepted value (when checking is enabled);
    /// 6. online only: the balance covers the fee.
    pub fn sign(
        &self,
        account: &Account,
        balance: &dyn BalanceSource,
        config: &EncoderConfig,
    ) -> Result<SignedRegisterContract, BuildError> {
        let keypair = account.keypair().ok_or(BuildError::MissingSigningKey)?;

        let min = min_contract_string_size();
        if self.contract.len() < min {
            return Err(BuildError::ContractTooShort {
                min,
                got: self.contract.len(),
            });
        }
        let contract_bytes = bs58::decode(&self.contract)
            .into_vec()
            .map_err(|_| BuildError::ContractUndecodable)?;
        if contract_bytes.len() > usize::from(u16::MAX) {
            return Err(BuildError::ContractTooLarge {
                len: contract_bytes.len(),
            });
        }

        if self.fee < MIN_REGISTER_CONTRACT_FEE {
            return Err(BuildError::FeeBelowMinimum {
                minimum: MIN_REGISTER_CONTRACT_FEE,
                got: self.fee,
            });
        }
        if self.description.len() > MAX_ATTACHMENT_SIZE {
            return Err(BuildError::AttachmentTooLarge {
                max: MAX_ATTACHMENT_SIZE,
                got: self.description.len(),
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

        let description_bytes = self.description.as_bytes();
        let mut payload = Vec::with_capacity(
            1 + 2 + contract_bytes.len() + 2 + data_stack_bytes.len() + 2
                + description_bytes.len()
                + 8 + 2 + 8,
        );
        payload.push(REGISTER_CONTRACT_TX_TYPE);
        payload.extend_from_slice(&(contract_bytes.len() as u16).to_be_bytes());
        payload.extend_from_slice(&contract_bytes);
        payload.extend_from_slice(&(data_stack_bytes.len() as u16).to_be_bytes());
        payload.extend_from_slice(&data_stack_bytes);
        payload.extend_from_slice(&(description_bytes.len() as u16).to_be_bytes());
        payload.extend_from_slice(description_bytes);
        payload.extend_from_slice(&self.fee.to_be_bytes());
        payload.extend_from_slice(&self.fee_scale.to_be_bytes());
        payload.extend_from_slice(&timestamp.to_be_bytes());

        let signature = keypair.sign(&payload);
        tracing::debug!(
            fee = self.fee,
            timestamp,
            contract_bytes = contract_bytes.len(),
            "signed contract registration"
        );

        Ok(SignedRegisterContract {
            sender_public_key: account.public_key().to_base58(),
            contract: self.contract.clone(),
            init_data: bs58::encode(&data_stack_bytes).into_string(),
            description: bs58::encode(description_bytes).into_string(),
            fee: self.fee,
            fee_scale: self.fee_scale,
            timestamp,
            signature: signature.to_base58(),
        })
    }
}
