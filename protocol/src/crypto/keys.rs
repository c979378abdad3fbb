//! # Key Management
//!
//! Ed25519 keypairs for signing transactions, and the public-key type the
//! crypto suite recovers during verification.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (ed25519-dalek does this for us).
//! - Key generation uses `OsRng`.
//! - Secret key bytes are never logged or included in `Debug` output.

use ed25519_dalek::{SigningKey, VerifyingKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::PUBLIC_KEY_LENGTH;

/// Errors that can occur during key operations.
///
/// Kept vague on purpose: error messages should not describe key material.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// An Ed25519 signing keypair.
///
/// Does not implement `Serialize`. Exporting a secret key should be an
/// explicit call to [`KeyPair::secret_key_bytes`], never a side effect of
/// serializing some larger struct.
///
/// # Examples
///
/// ```
/// use keel_protocol::crypto::keys::KeyPair;
///
/// let kp = KeyPair::generate();
/// assert_eq!(kp.public_key().as_bytes().len(), 32);
/// ```
pub struct KeyPair {
    signing_key: SigningKey,
}

/// The public half of a keypair, as recovered from a transaction signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl KeyPair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    ///
    /// A weak seed gives a weak key. Use a CSPRNG or KDF output.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; SECRET_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Exports the raw 32-byte secret key material. Handle with care.
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material, not even partially.
        write!(f, "KeyPair(pub={})", self.public_key().to_hex())
    }
}

impl PublicKey {
    /// Wrap raw bytes without validating the curve point.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parse and validate a public key from a byte slice.
    ///
    /// Rejects wrong lengths and byte strings that are not valid Ed25519 points.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    pub fn to_verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        VerifyingKey::from_bytes(&self.bytes).map_err(|_| KeyError::InvalidPublicKey)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_from_seed() {
        let seed = [42u8; 32];
        let kp1 = KeyPair::from_seed(&seed);
        let kp2 = KeyPair::from_seed(&seed);
        assert_eq!(kp1.public_key(), kp2.public_key());
    }

    #[test]
    fn test_two_generated_keypairs_are_different() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::generate();
        assert_ne!(kp1.public_key(), kp2.public_key());
    }

    #[test]
    fn test_roundtrip_hex() {
        let kp = KeyPair::generate();
        let restored = KeyPair::from_hex(&hex::encode(kp.secret_key_bytes())).unwrap();
        assert_eq!(kp.public_key(), restored.public_key());
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert_eq!(
            KeyPair::from_hex("deadbeef").unwrap_err(),
            KeyError::InvalidSecretKey
        );
        assert!(KeyPair::from_hex("not-hex-at-all").is_err());
    }

    #[test]
    fn public_key_try_from_slice() {
        let kp = KeyPair::generate();
        let pk = PublicKey::try_from_slice(kp.public_key().as_bytes()).unwrap();
        assert_eq!(pk, kp.public_key());
        assert_eq!(
            PublicKey::try_from_slice(&[0u8; 16]).unwrap_err(),
            KeyError::InvalidPublicKey
        );
    }

    #[test]
    fn test_clone_preserves_identity() {
        let kp = KeyPair::generate();
        let cloned = kp.clone();
        assert_eq!(kp.secret_key_bytes(), cloned.secret_key_bytes());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let kp = KeyPair::generate();
        let debug_str = format!("{:?}", kp);
        assert!(debug_str.starts_with("KeyPair(pub="));
        assert!(!debug_str.contains(&hex::encode(kp.secret_key_bytes())));
    }
}
