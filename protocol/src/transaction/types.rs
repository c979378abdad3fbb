//! Core enums for transactions.
//!
//! Kept `Copy` so they can be passed around the validation path freely.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// What a transaction does, derived from its recipient and input.
///
/// The type is not stored separately on the wire: it is a pure function of
/// the signed fields, so every node derives the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// No recipient and no input. Carries nothing executable.
    NullTransaction,
    /// No recipient; the input is contract init code.
    ContractCreation,
    /// Call into an existing account or contract.
    MessageCall,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullTransaction => write!(f, "NullTransaction"),
            Self::ContractCreation => write!(f, "ContractCreation"),
            Self::MessageCall => write!(f, "MessageCall"),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionStatus
// ---------------------------------------------------------------------------

/// Final outcome reported to a transaction's submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Accepted but not yet final.
    Pending,
    /// Included in a committed block.
    Committed,
    /// Permanently rejected (bad signature, execution failure, policy).
    Rejected,
    /// The chain passed the transaction's block limit before inclusion.
    Expired,
}

impl TransactionStatus {
    /// Whether this status ends the transaction's lifecycle.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Committed => write!(f, "Committed"),
            Self::Rejected => write!(f, "Rejected"),
            Self::Expired => write!(f, "Expired"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_display() {
        assert_eq!(TransactionType::MessageCall.to_string(), "MessageCall");
        assert_eq!(TransactionType::ContractCreation.to_string(), "ContractCreation");
    }

    #[test]
    fn only_pending_is_not_final() {
        assert!(!TransactionStatus::Pending.is_final());
        assert!(TransactionStatus::Committed.is_final());
        assert!(TransactionStatus::Rejected.is_final());
        assert!(TransactionStatus::Expired.is_final());
    }

    #[test]
    fn transaction_status_serde_roundtrip() {
        let json = serde_json::to_string(&TransactionStatus::Committed).unwrap();
        assert_eq!(json, "\"Committed\"");
        let recovered: TransactionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, TransactionStatus::Committed);
    }
}
