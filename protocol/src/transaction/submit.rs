//! Submission results and the single-shot callback contract.
//!
//! Whoever submits a transaction may attach a callback. The component that
//! decides the transaction's fate (the commit path for included transactions,
//! the pool or verifier for rejected ones) fires it exactly once, through
//! [`Transaction::notify_submit_result`](super::Transaction::notify_submit_result).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tx::Transaction;
use super::types::TransactionStatus;
use crate::types::{Address, Nonce, H256};

/// Why a submitted transaction will never be committed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("transaction {hash} has an invalid signature")]
    InvalidSignature { hash: H256 },

    #[error("transaction {hash} expired at block limit {block_limit}")]
    Expired { hash: H256, block_limit: i64 },

    #[error("transaction {hash} rejected: {reason}")]
    Rejected { hash: H256, reason: String },
}

impl SubmitError {
    /// The status reported alongside this error.
    pub fn status(&self) -> TransactionStatus {
        match self {
            Self::Expired { .. } => TransactionStatus::Expired,
            Self::InvalidSignature { .. } | Self::Rejected { .. } => TransactionStatus::Rejected,
        }
    }
}

/// Where and how a transaction was committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSubmitResult {
    pub tx_hash: H256,
    pub block_number: i64,
    pub block_hash: H256,
    /// Position of the transaction within its block.
    pub transaction_index: u64,
    pub nonce: Nonce,
    pub to: Option<Address>,
    pub sender: Option<Address>,
    pub status: TransactionStatus,
}

impl TransactionSubmitResult {
    /// Result for a transaction included in a committed block.
    pub fn committed(
        tx: &Transaction,
        block_number: i64,
        block_hash: H256,
        transaction_index: u64,
    ) -> Self {
        Self {
            tx_hash: tx.hash(),
            block_number,
            block_hash,
            transaction_index,
            nonce: tx.nonce(),
            to: tx.to(),
            sender: tx.sender(),
            status: TransactionStatus::Committed,
        }
    }
}

/// Outcome delivered to a submitter: a commit result, or the reason the
/// transaction was dropped.
pub type SubmitOutcome = Result<TransactionSubmitResult, SubmitError>;

/// Callback invoked once with a transaction's final outcome.
pub type TxSubmitCallback = Box<dyn FnOnce(SubmitOutcome) + Send + 'static>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_mapping() {
        let hash = H256::new([1; 32]);
        assert_eq!(
            SubmitError::InvalidSignature { hash }.status(),
            TransactionStatus::Rejected
        );
        assert_eq!(
            SubmitError::Expired {
                hash,
                block_limit: 10
            }
            .status(),
            TransactionStatus::Expired
        );
    }

    #[test]
    fn error_messages_name_the_transaction() {
        let hash = H256::new([0xAB; 32]);
        let msg = SubmitError::Rejected {
            hash,
            reason: "nonce reused".to_string(),
        }
        .to_string();
        assert!(msg.contains(&hash.to_hex()));
        assert!(msg.contains("nonce reused"));
    }

    #[test]
    fn submit_result_serde_roundtrip() {
        let result = TransactionSubmitResult {
            tx_hash: H256::new([2; 32]),
            block_number: 11,
            block_hash: H256::new([3; 32]),
            transaction_index: 4,
            nonce: Nonce::from(1u64),
            to: Some(Address::repeat_byte(0xAA)),
            sender: None,
            status: TransactionStatus::Committed,
        };
        let json = serde_json::to_string(&result).unwrap();
        let recovered: TransactionSubmitResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, recovered);
    }
}
