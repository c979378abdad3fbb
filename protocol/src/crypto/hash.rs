//! # Hashing Utilities
//!
//! The two hash functions a node may be configured with:
//!
//! - **BLAKE3** — the default. Fast on every platform and resistant to length
//!   extension, so no double-hashing tricks are needed.
//! - **SHA-256** — for deployments that must interoperate with external
//!   systems that expect it.
//!
//! Every node in a network must run the same algorithm. A node hashing with
//! SHA-256 derives different transaction hashes and sender addresses than a
//! node hashing with BLAKE3, and the two will never agree on a block.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::H256;

/// Hash function selected for a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    Blake3,
    Sha256,
}

impl HashAlgorithm {
    /// Digest `data` with this algorithm.
    pub fn digest(&self, data: &[u8]) -> H256 {
        match self {
            Self::Blake3 => H256::new(blake3_hash(data)),
            Self::Sha256 => H256::new(sha256(data)),
        }
    }
}

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use keel_protocol::crypto::hash::sha256;
///
/// let hash = sha256(b"keel");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the BLAKE3 hash of the input data.
///
/// Uses the `blake3` crate, which picks SIMD backends at runtime. For
/// transaction-sized inputs (well under a kilobyte) the single-threaded path
/// is what runs.
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256 of the empty string.
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);
    }

    #[test]
    fn test_blake3_known_vector() {
        // BLAKE3 of the empty string.
        let hash = blake3_hash(b"");
        let expected =
            hex::decode("af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);
    }

    #[test]
    fn digest_dispatches_on_algorithm() {
        let data = b"keel transaction";
        assert_eq!(HashAlgorithm::Blake3.digest(data), H256::new(blake3_hash(data)));
        assert_eq!(HashAlgorithm::Sha256.digest(data), H256::new(sha256(data)));
        assert_ne!(
            HashAlgorithm::Blake3.digest(data),
            HashAlgorithm::Sha256.digest(data)
        );
    }

    #[test]
    fn blake3_deterministic() {
        let a = blake3_hash(b"keel");
        let b = blake3_hash(b"keel");
        assert_eq!(a, b);
        assert_ne!(a, blake3_hash(b"Keel"));
    }
}
