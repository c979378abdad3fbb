//! Canonical transaction encoding.
//!
//! The hash of a transaction is the hash of its *hash fields* encoding, so
//! this encoding is the one thing every node must produce byte-for-byte
//! identically. Serde formats are avoided for it on purpose: the layout below
//! is fixed by hand and does not depend on a serializer's version or options.
//!
//! ## Layout
//!
//! All integers little-endian; variable-length fields are prefixed with a
//! `u32` length.
//!
//! ```text
//! version      i32
//! chain_id     u32 len | UTF-8
//! group_id     u32 len | UTF-8
//! block_limit  i64
//! nonce        32 bytes, big-endian
//! to           u8 flag (0 = none, 1 = present) | 20 bytes if present
//! input        u32 len | bytes
//! ------------ end of hash fields
//! signature    u32 len | bytes
//! ```
//!
//! A full encoding is always the hash-fields encoding followed by the
//! signature, so `encode(fields, true)` starts with `encode(fields, false)`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{
    ADDRESS_LENGTH, MAX_ID_LENGTH, MAX_SIGNATURE_LENGTH, MAX_TX_SIZE_BYTES, NONCE_LENGTH,
};
use crate::types::{Address, Nonce};

// ---------------------------------------------------------------------------
// TransactionFields
// ---------------------------------------------------------------------------

/// The signed payload of a transaction, as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFields {
    pub version: i32,
    pub chain_id: String,
    pub group_id: String,
    /// Last block number at which the transaction may still be included.
    pub block_limit: i64,
    pub nonce: Nonce,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub input: Vec<u8>,
    /// Excluded from the hash. Empty until signed.
    pub signature: Vec<u8>,
}

// ---------------------------------------------------------------------------
// DecodeError
// ---------------------------------------------------------------------------

/// Malformed transaction bytes. Fatal for that transaction: it is rejected
/// before it reaches the pool.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty transaction encoding")]
    Empty,

    #[error("encoded transaction too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("unexpected end of input while reading {field}")]
    Truncated { field: &'static str },

    #[error("{field} too long: {len} bytes (max {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("invalid presence flag {flag:#04x} for {field}")]
    InvalidFlag { field: &'static str, flag: u8 },

    #[error("{count} trailing bytes after transaction")]
    TrailingBytes { count: usize },

    #[error("transaction is unsigned")]
    MissingSignature,

    #[error("malformed signature: expected {expected} bytes, got {actual}")]
    MalformedSignature { expected: usize, actual: usize },
}

// ---------------------------------------------------------------------------
// TransactionCodec
// ---------------------------------------------------------------------------

/// Serialization collaborator for transactions.
///
/// Implementations must be deterministic and canonical: identical fields
/// always produce identical bytes, and decoding accepts exactly one encoding
/// per logical transaction.
pub trait TransactionCodec: Send + Sync + fmt::Debug {
    /// Parse a full encoding (hash fields plus signature).
    ///
    /// With `check_signature`, structurally missing signatures are rejected.
    /// Decoding never verifies a signature cryptographically.
    fn decode(&self, data: &[u8], check_signature: bool)
        -> Result<TransactionFields, DecodeError>;

    /// Serialize `fields`, with or without the trailing signature.
    fn encode(&self, fields: &TransactionFields, include_signature: bool) -> Vec<u8>;
}

/// The length-prefixed little-endian layout described in the module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalCodec {
    max_size: usize,
}

impl CanonicalCodec {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for CanonicalCodec {
    fn default() -> Self {
        Self::new(MAX_TX_SIZE_BYTES)
    }
}

impl TransactionCodec for CanonicalCodec {
    fn decode(
        &self,
        data: &[u8],
        check_signature: bool,
    ) -> Result<TransactionFields, DecodeError> {
        if data.is_empty() {
            return Err(DecodeError::Empty);
        }
        if data.len() > self.max_size {
            return Err(DecodeError::TooLarge {
                size: data.len(),
                max: self.max_size,
            });
        }

        let mut reader = Reader::new(data);
        let version = reader.i32("version")?;
        let chain_id = reader.string("chain_id", MAX_ID_LENGTH)?;
        let group_id = reader.string("group_id", MAX_ID_LENGTH)?;
        let block_limit = reader.i64("block_limit")?;
        let nonce = Nonce::from_be_bytes(reader.array::<NONCE_LENGTH>("nonce")?);
        let to = match reader.u8("to")? {
            0 => None,
            1 => Some(Address::new(reader.array::<ADDRESS_LENGTH>("to")?)),
            flag => return Err(DecodeError::InvalidFlag { field: "to", flag }),
        };
        let input = reader.bytes("input", self.max_size)?.to_vec();
        let signature = reader.bytes("signature", MAX_SIGNATURE_LENGTH)?.to_vec();

        if reader.remaining() > 0 {
            return Err(DecodeError::TrailingBytes {
                count: reader.remaining(),
            });
        }
        if check_signature && signature.is_empty() {
            return Err(DecodeError::MissingSignature);
        }

        Ok(TransactionFields {
            version,
            chain_id,
            group_id,
            block_limit,
            nonce,
            to,
            input,
            signature,
        })
    }

    fn encode(&self, fields: &TransactionFields, include_signature: bool) -> Vec<u8> {
        let mut buf = Vec::with_capacity(128 + fields.input.len() + fields.signature.len());

        buf.extend_from_slice(&fields.version.to_le_bytes());
        put_bytes(&mut buf, fields.chain_id.as_bytes());
        put_bytes(&mut buf, fields.group_id.as_bytes());
        buf.extend_from_slice(&fields.block_limit.to_le_bytes());
        buf.extend_from_slice(&fields.nonce.to_be_bytes());
        match &fields.to {
            Some(to) => {
                buf.push(0x01);
                buf.extend_from_slice(to.as_bytes());
            }
            None => buf.push(0x00),
        }
        put_bytes(&mut buf, &fields.input);

        if include_signature {
            put_bytes(&mut buf, &fields.signature);
        }
        buf
    }
}

fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    buf.extend_from_slice(bytes);
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::Truncated { field });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    fn u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.array::<1>(field)?[0])
    }

    fn u32(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.array(field)?))
    }

    fn i32(&mut self, field: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.array(field)?))
    }

    fn i64(&mut self, field: &'static str) -> Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.array(field)?))
    }

    fn bytes(&mut self, field: &'static str, max: usize) -> Result<&'a [u8], DecodeError> {
        let len = self.u32(field)? as usize;
        if len > max {
            return Err(DecodeError::FieldTooLong { field, len, max });
        }
        self.take(len, field)
    }

    fn string(&mut self, field: &'static str, max: usize) -> Result<String, DecodeError> {
        let raw = self.bytes(field, max)?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8 { field })
    }
}
