//! Fixed-width value types shared by the transaction and ledger modules.
//!
//! These are intentionally small and `Copy` so they can be returned from
//! locked caches by value without holding the lock.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ADDRESS_LENGTH, HASH_LENGTH, NONCE_LENGTH};

/// Errors when parsing a fixed-width type from bytes or hex.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

fn decode_hex(s: &str) -> Result<Vec<u8>, TypeError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))
}

fn copy_exact<const N: usize>(slice: &[u8]) -> Result<[u8; N], TypeError> {
    slice.try_into().map_err(|_| TypeError::InvalidLength {
        expected: N,
        actual: slice.len(),
    })
}

// ---------------------------------------------------------------------------
// H256
// ---------------------------------------------------------------------------

/// A 32-byte digest: transaction hashes, block hashes, ledger state hashes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct H256([u8; HASH_LENGTH]);

impl H256 {
    pub const fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// The all-zero hash, used as "unset" for ledger state hashes.
    pub const fn zero() -> Self {
        Self([0u8; HASH_LENGTH])
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, TypeError> {
        copy_exact(slice).map(Self)
    }

    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        Self::from_slice(&decode_hex(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_LENGTH]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; HASH_LENGTH]> for H256 {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for H256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H256({})", self)
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account address derived from a public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Every byte set to `byte`. Handy for fixtures such as `0xAA..AA`.
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; ADDRESS_LENGTH])
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, TypeError> {
        copy_exact(slice).map(Self)
    }

    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        Self::from_slice(&decode_hex(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

// ---------------------------------------------------------------------------
// Nonce
// ---------------------------------------------------------------------------

/// A 256-bit transaction nonce, stored big-endian.
///
/// Senders usually pick a random value; uniqueness is enforced by the pool,
/// not here.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Nonce([u8; NONCE_LENGTH]);

impl Nonce {
    pub const fn from_be_bytes(bytes: [u8; NONCE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// A uniformly random nonce from the OS RNG.
    pub fn random() -> Self {
        Self(rand::random())
    }

    pub fn to_be_bytes(&self) -> [u8; NONCE_LENGTH] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; NONCE_LENGTH]
    }
}

impl From<u64> for Nonce {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; NONCE_LENGTH];
        bytes[NONCE_LENGTH - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = hex::encode(self.0);
        let trimmed = encoded.trim_start_matches('0');
        if trimmed.is_empty() {
            write!(f, "0x0")
        } else {
            write!(f, "0x{}", trimmed)
        }
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h256_hex_round_trip() {
        let hash = H256::new([0xAB; 32]);
        assert_eq!(H256::from_hex(&hash.to_hex()).unwrap(), hash);
        assert_eq!(H256::from_hex(&format!("{}", hash)).unwrap(), hash);
    }

    #[test]
    fn h256_rejects_wrong_length() {
        assert_eq!(
            H256::from_slice(&[0u8; 31]),
            Err(TypeError::InvalidLength {
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn zero_hash_is_default() {
        assert!(H256::default().is_zero());
        assert!(!H256::new([1; 32]).is_zero());
    }

    #[test]
    fn address_parses_prefixed_hex() {
        let addr = Address::from_hex("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap();
        assert_eq!(addr, Address::repeat_byte(0xAA));
        assert!(Address::from_hex("0xzz").is_err());
    }

    #[test]
    fn nonce_from_u64_is_big_endian() {
        let nonce = Nonce::from(1u64);
        let bytes = nonce.to_be_bytes();
        assert_eq!(bytes[31], 1);
        assert!(bytes[..31].iter().all(|b| *b == 0));
        assert_eq!(nonce.to_string(), "0x1");
        assert_eq!(Nonce::default().to_string(), "0x0");
    }

    #[test]
    fn nonce_ordering_follows_numeric_value() {
        assert!(Nonce::from(2u64) > Nonce::from(1u64));
        assert!(Nonce::from(256u64) > Nonce::from(255u64));
    }
}
