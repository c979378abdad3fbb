use thiserror::Error;

/// Errors raised when publishing or exchanging ledger snapshots.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A snapshot would move the published block number backwards or
    /// repeat it.
    #[error("ledger config inconsistency: block {next} does not follow {previous}")]
    ConfigInconsistency { previous: i64, next: i64 },

    #[error("invalid ledger parameter {field}: {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: &'static str,
    },

    #[error("ledger snapshot serialization error: {0}")]
    Serialization(String),
}
