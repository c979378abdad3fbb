//! The crypto provider contract consumed by transactions.
//!
//! A [`CryptoSuite`] bundles the three operations the transaction core needs:
//! hashing, public-key recovery from a signature, and address derivation.
//! Implementations are stateless and shared across threads as
//! `Arc<dyn CryptoSuite>`; every transaction holds a reference to the suite
//! it was decoded or built with.

use std::fmt;

use thiserror::Error;

use super::keys::PublicKey;
use crate::types::{Address, H256};

/// Errors raised by signature recovery.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature does not verify against the recovered key and hash.
    #[error("signature verification failed")]
    SignatureInvalid,

    /// The signature blob has the wrong size for this suite.
    #[error("malformed signature: expected {expected} bytes, got {actual}")]
    MalformedSignature { expected: usize, actual: usize },

    /// The public key embedded in or recovered from the signature is not a
    /// valid curve point.
    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Pluggable cryptography provider.
///
/// All methods are pure: the same inputs always produce the same outputs on
/// every node. Transactions rely on that to agree on hashes and senders.
pub trait CryptoSuite: Send + Sync + fmt::Debug {
    /// Hash arbitrary bytes.
    fn hash(&self, data: &[u8]) -> H256;

    /// Recover the signer's public key from a transaction hash and the
    /// signature blob carried by the transaction.
    fn recover(&self, hash: &H256, signature: &[u8]) -> Result<PublicKey, CryptoError>;

    /// Derive the account address owned by `public_key`.
    fn calculate_address(&self, public_key: &PublicKey) -> Address;

    /// Exact size of a well-formed signature blob. Used by decoders to reject
    /// structurally invalid signatures before any verification is attempted.
    fn signature_length(&self) -> usize;
}
