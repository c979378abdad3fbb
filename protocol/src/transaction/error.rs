use thiserror::Error;

use super::codec::DecodeError;
use crate::crypto::CryptoError;
use crate::types::H256;

/// Errors raised by transaction decoding and verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Sender recovery failed. The transaction is marked invalid but stays
    /// alive for diagnostics.
    #[error("invalid signature on transaction {hash}: {source}")]
    SignatureInvalid {
        hash: H256,
        #[source]
        source: CryptoError,
    },
}
