//! # Protocol Configuration & Constants
//!
//! Every magic number the transaction and ledger core depends on lives here.
//! Changing any of the encoding limits after launch splits the network: nodes
//! with different limits will accept different byte sequences, so treat this
//! file as consensus-critical.

use serde::{Deserialize, Serialize};

use crate::crypto::hash::HashAlgorithm;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Chain identifier used when none is configured.
pub const DEFAULT_CHAIN_ID: &str = "keel";

/// Group identifier used when none is configured. A chain can host several
/// groups, each with its own ledger and consensus node set.
pub const DEFAULT_GROUP_ID: &str = "group0";

/// Current transaction format version.
pub const TRANSACTION_VERSION: i32 = 0;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Hash output length in bytes. Both SHA-256 and BLAKE3 produce 32-byte digests.
pub const HASH_LENGTH: usize = 32;

/// Account address length. Addresses are the trailing 20 bytes of the hash
/// of the signer's public key.
pub const ADDRESS_LENGTH: usize = 20;

/// Nonce width in bytes (a 256-bit big-endian integer).
pub const NONCE_LENGTH: usize = 32;

/// Ed25519 public key length.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Raw Ed25519 signature length.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// Length of the signature blob carried by an Ed25519 transaction:
/// the 64-byte signature followed by the 32-byte signer public key.
/// Ed25519 cannot recover a key from a signature, so the key rides along.
pub const SIGNATURE_DATA_LENGTH: usize = ED25519_SIGNATURE_LENGTH + PUBLIC_KEY_LENGTH;

// ---------------------------------------------------------------------------
// Encoding Limits
// ---------------------------------------------------------------------------

/// Maximum encoded transaction size in bytes.
pub const MAX_TX_SIZE_BYTES: usize = 256 * 1024;

/// Maximum length of the chain and group identifiers.
pub const MAX_ID_LENGTH: usize = 64;

/// Maximum signature blob length accepted by the codec before any
/// suite-specific length check.
pub const MAX_SIGNATURE_LENGTH: usize = 256;

// ---------------------------------------------------------------------------
// Ledger Defaults
// ---------------------------------------------------------------------------

/// Consensus round timeout applied when a ledger snapshot does not set one.
pub const DEFAULT_CONSENSUS_TIMEOUT_MS: u64 = 3_000;

/// Per-block transaction cap applied when a ledger snapshot does not set one.
pub const DEFAULT_BLOCK_TX_COUNT_LIMIT: u64 = 1_000;

/// Upper bound on an encoded ledger snapshot received during sync.
pub const MAX_LEDGER_SNAPSHOT_BYTES: u64 = 16 * 1024 * 1024;

// ---------------------------------------------------------------------------
// ProtocolConfig
// ---------------------------------------------------------------------------

/// Node-local parameters for building and decoding transactions.
///
/// Defaults match a single-group devnet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Chain identifier stamped on locally built transactions.
    pub chain_id: String,
    /// Group identifier stamped on locally built transactions.
    pub group_id: String,
    /// Hash function used for transaction hashes and address derivation.
    pub hash_algorithm: HashAlgorithm,
    /// Upper bound on accepted transaction encodings.
    pub max_tx_size: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            hash_algorithm: HashAlgorithm::Blake3,
            max_tx_size: MAX_TX_SIZE_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_data_layout() {
        assert_eq!(SIGNATURE_DATA_LENGTH, 96);
        assert!(SIGNATURE_DATA_LENGTH <= MAX_SIGNATURE_LENGTH);
    }

    #[test]
    fn test_address_fits_in_hash() {
        assert!(ADDRESS_LENGTH <= HASH_LENGTH);
    }

    #[test]
    fn test_ledger_defaults_are_positive() {
        // Zero values are rejected by the publisher, so the defaults must not be zero.
        assert!(DEFAULT_CONSENSUS_TIMEOUT_MS > 0);
        assert!(DEFAULT_BLOCK_TX_COUNT_LIMIT > 0);
    }

    #[test]
    fn test_protocol_config_default() {
        let config = ProtocolConfig::default();
        assert_eq!(config.chain_id, "keel");
        assert_eq!(config.group_id, "group0");
        assert_eq!(config.hash_algorithm, HashAlgorithm::Blake3);
        assert_eq!(config.max_tx_size, MAX_TX_SIZE_BYTES);
    }
}
