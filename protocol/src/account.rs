//! # Accounts
//!
//! A thin account model for the transaction builders: a public key,
//! optionally paired with its signing keypair. Watch-only accounts can
//! derive addresses and assemble unsigned previews but cannot produce a
//! broadcast record; the builders reject them before any byte
//! construction.
//!
//! The balance check behind online transaction building goes through the
//! [`BalanceSource`] seam; the node query itself lives with the caller.

use thiserror::Error;

use crate::address::Network;
use crate::crypto::{VelaKeypair, VelaPublicKey};

/// A balance query failed before an answer was obtained.
///
/// Transport failures must surface to the caller. A build call never
/// swallows one into a silent "balance is fine".
#[derive(Debug, Error)]
#[error("balance query failed: {reason}")]
pub struct BalanceError {
    /// Human-readable cause, typically the transport's own message.
    pub reason: String,
}

/// Supplies the confirmed balance of one account, in sparks.
///
/// Implemented over the node API by callers; implemented by
/// [`FixedBalance`] in tests.
pub trait BalanceSource {
    fn balance(&self) -> Result<u64, BalanceError>;
}

/// A constant balance. The test-and-offline implementation of
/// [`BalanceSource`].
#[derive(Debug, Clone, Copy)]
pub struct FixedBalance(pub u64);

impl BalanceSource for FixedBalance {
    fn balance(&self) -> Result<u64, BalanceError> {
        Ok(self.0)
    }
}

/// A ledger account: public key plus, when signing is possible, the
/// keypair behind it.
#[derive(Debug)]
pub struct Account {
    keypair: Option<VelaKeypair>,
    public_key: VelaPublicKey,
}

impl Account {
    /// A full account that can sign transactions.
    pub fn from_keypair(keypair: VelaKeypair) -> Self {
        let public_key = keypair.public_key();
        Self {
            keypair: Some(keypair),
            public_key,
        }
    }

    /// A watch-only account: address derivation and previews, no signing.
    pub fn watch_only(public_key: VelaPublicKey) -> Self {
        Self {
            keypair: None,
            public_key,
        }
    }

    /// The account's public key.
    pub fn public_key(&self) -> &VelaPublicKey {
        &self.public_key
    }

    /// The signing keypair, when this is not a watch-only account.
    pub fn keypair(&self) -> Option<&VelaKeypair> {
        self.keypair.as_ref()
    }

    /// The account's base-58 address on the given network.
    pub fn address(&self, network: &Network) -> String {
        network.address_from_public_key(self.public_key.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_account_exposes_keypair() {
        let account = Account::from_keypair(VelaKeypair::from_seed(&[1u8; 32]));
        assert!(account.keypair().is_some());
    }

    #[test]
    fn watch_only_account_cannot_sign() {
        let pk = VelaKeypair::from_seed(&[2u8; 32]).public_key();
        let account = Account::watch_only(pk);
        assert!(account.keypair().is_none());
    }

    #[test]
    fn address_matches_direct_derivation() {
        let kp = VelaKeypair::from_seed(&[3u8; 32]);
        let net = Network::mainnet();
        let expected = net.address_from_public_key(kp.public_key().as_bytes());
        let account = Account::from_keypair(kp);
        assert_eq!(account.address(&net), expected);
        assert!(net.validate_address(&account.address(&net)));
    }

    #[test]
    fn fixed_balance_answers() {
        assert_eq!(FixedBalance(42).balance().unwrap(), 42);
    }
}
