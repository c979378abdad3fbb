//! # Ed25519 Crypto Suite
//!
//! The default [`CryptoSuite`]: Ed25519 signatures over the transaction
//! hash, with BLAKE3 or SHA-256 for hashing and address derivation.
//!
//! ## Signature blob layout
//!
//! Ed25519 cannot recover a public key from a signature the way ECDSA can,
//! so the signer's key travels with the signature:
//!
//! ```text
//! [ 64-byte Ed25519 signature | 32-byte public key ]
//! ```
//!
//! "Recovery" parses the embedded key and verifies the signature against it.
//! A blob whose signature does not verify under its own key is rejected, so
//! nobody can claim a sender they do not hold the key for.
//!
//! ## Strictness
//!
//! Verification uses `verify_strict`, which rejects small-order keys and
//! non-canonical signatures. Every node must accept exactly the same set of
//! signatures, and lenient verification is where implementations disagree.

use ed25519_dalek::{Signature as DalekSignature, Signer};

use super::hash::HashAlgorithm;
use super::keys::{KeyPair, PublicKey};
use super::suite::{CryptoError, CryptoSuite};
use crate::config::{ADDRESS_LENGTH, ED25519_SIGNATURE_LENGTH, HASH_LENGTH, SIGNATURE_DATA_LENGTH};
use crate::types::{Address, H256};

/// Ed25519 signatures with a configurable hash function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Suite {
    hash_algorithm: HashAlgorithm,
}

impl Ed25519Suite {
    pub fn new(hash_algorithm: HashAlgorithm) -> Self {
        Self { hash_algorithm }
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    /// Sign a transaction hash, producing the blob stored in the
    /// transaction's signature field.
    ///
    /// Ed25519 signing is deterministic: the same key and hash always give
    /// the same blob.
    pub fn sign(&self, keypair: &KeyPair, hash: &H256) -> Vec<u8> {
        let signature = keypair.signing_key().sign(hash.as_bytes());
        let mut blob = Vec::with_capacity(SIGNATURE_DATA_LENGTH);
        blob.extend_from_slice(&signature.to_bytes());
        blob.extend_from_slice(keypair.public_key().as_bytes());
        blob
    }
}

impl Default for Ed25519Suite {
    fn default() -> Self {
        Self::new(HashAlgorithm::Blake3)
    }
}

impl CryptoSuite for Ed25519Suite {
    fn hash(&self, data: &[u8]) -> H256 {
        self.hash_algorithm.digest(data)
    }

    fn recover(&self, hash: &H256, signature: &[u8]) -> Result<PublicKey, CryptoError> {
        if signature.len() != SIGNATURE_DATA_LENGTH {
            return Err(CryptoError::MalformedSignature {
                expected: SIGNATURE_DATA_LENGTH,
                actual: signature.len(),
            });
        }
        let (raw_signature, raw_key) = signature.split_at(ED25519_SIGNATURE_LENGTH);

        let public_key =
            PublicKey::try_from_slice(raw_key).map_err(|_| CryptoError::InvalidPublicKey)?;
        let verifying_key = public_key
            .to_verifying_key()
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        let dalek_signature =
            DalekSignature::from_slice(raw_signature).map_err(|_| CryptoError::SignatureInvalid)?;

        verifying_key
            .verify_strict(hash.as_bytes(), &dalek_signature)
            .map_err(|_| CryptoError::SignatureInvalid)?;

        Ok(public_key)
    }

    fn calculate_address(&self, public_key: &PublicKey) -> Address {
        let digest = self.hash(public_key.as_bytes());
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest.as_bytes()[HASH_LENGTH - ADDRESS_LENGTH..]);
        Address::new(bytes)
    }

    fn signature_length(&self) -> usize {
        SIGNATURE_DATA_LENGTH
    }
}
