//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] assembles unsigned [`TransactionFields`]. The
//! builder does not sign; that happens in [`super::signing`], so construction
//! stays testable without key material.

use super::codec::TransactionFields;
use crate::config::{DEFAULT_CHAIN_ID, DEFAULT_GROUP_ID, TRANSACTION_VERSION};
use crate::types::{Address, Nonce};

/// Fluent builder for unsigned transaction fields.
///
/// # Usage
///
/// ```rust,no_run
/// use keel_protocol::transaction::TransactionBuilder;
/// use keel_protocol::types::{Address, Nonce};
///
/// let fields = TransactionBuilder::new()
///     .nonce(Nonce::from(1u64))
///     .block_limit(500)
///     .to(Address::repeat_byte(0xAA))
///     .input(vec![0x01, 0x02])
///     .build_fields();
/// ```
///
/// Defaults: current transaction version, the devnet chain and group ids,
/// a random nonce, block limit 0, no recipient, empty input.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    version: i32,
    chain_id: String,
    group_id: String,
    block_limit: i64,
    nonce: Option<Nonce>,
    to: Option<Address>,
    input: Vec<u8>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            version: TRANSACTION_VERSION,
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            block_limit: 0,
            nonce: None,
            to: None,
            input: Vec::new(),
        }
    }

    /// Only needed for testing version upgrades.
    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    /// Last block at which the transaction may be included.
    pub fn block_limit(mut self, block_limit: i64) -> Self {
        self.block_limit = block_limit;
        self
    }

    /// If not called, `build_fields()` draws a random nonce.
    pub fn nonce(mut self, nonce: Nonce) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn input(mut self, input: Vec<u8>) -> Self {
        self.input = input;
        self
    }

    /// Consumes the builder and produces unsigned fields.
    pub fn build_fields(self) -> TransactionFields {
        TransactionFields {
            version: self.version,
            chain_id: self.chain_id,
            group_id: self.group_id,
            block_limit: self.block_limit,
            nonce: self.nonce.unwrap_or_else(Nonce::random),
            to: self.to,
            input: self.input,
            signature: Vec::new(),
        }
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unsigned_devnet_fields() {
        let fields = TransactionBuilder::new().build_fields();
        assert_eq!(fields.version, TRANSACTION_VERSION);
        assert_eq!(fields.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(fields.group_id, DEFAULT_GROUP_ID);
        assert_eq!(fields.to, None);
        assert!(fields.input.is_empty());
        assert!(fields.signature.is_empty());
    }

    #[test]
    fn explicit_fields_are_kept() {
        let fields = TransactionBuilder::new()
            .version(3)
            .chain_id("mainnet")
            .group_id("group7")
            .block_limit(99)
            .nonce(Nonce::from(5u64))
            .to(Address::repeat_byte(0x01))
            .input(vec![9, 9])
            .build_fields();

        assert_eq!(fields.version, 3);
        assert_eq!(fields.chain_id, "mainnet");
        assert_eq!(fields.group_id, "group7");
        assert_eq!(fields.block_limit, 99);
        assert_eq!(fields.nonce, Nonce::from(5u64));
        assert_eq!(fields.to, Some(Address::repeat_byte(0x01)));
        assert_eq!(fields.input, vec![9, 9]);
    }

    #[test]
    fn unset_nonce_is_random() {
        let a = TransactionBuilder::new().build_fields();
        let b = TransactionBuilder::new().build_fields();
        assert_ne!(a.nonce, b.nonce);
    }
}
