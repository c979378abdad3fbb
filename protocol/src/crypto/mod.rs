//! # Cryptographic Primitives
//!
//! Everything the transaction core needs from cryptography, behind the
//! [`CryptoSuite`] trait so a deployment can swap algorithms without touching
//! transaction logic.
//!
//! - **hash** — BLAKE3 and SHA-256, selected per network by [`HashAlgorithm`].
//! - **keys** — Ed25519 keypairs and public keys.
//! - **suite** — the provider contract: hash, recover, derive address.
//! - **signatures** — [`Ed25519Suite`], the default provider.
//!
//! Nothing here is hand-rolled. These are thin wrappers around
//! `ed25519-dalek`, `sha2` and `blake3`.

pub mod hash;
pub mod keys;
pub mod signatures;
pub mod suite;

pub use hash::{blake3_hash, sha256, HashAlgorithm};
pub use keys::{KeyError, KeyPair, PublicKey};
pub use signatures::Ed25519Suite;
pub use suite::{CryptoError, CryptoSuite};
