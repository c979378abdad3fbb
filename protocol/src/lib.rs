// Copyright (c) 2026 Keel Contributors. MIT License.
// See LICENSE for details.

//! # Keel Protocol — Core Library
//!
//! The trust-boundary core of a Keel node: the transaction entity every
//! pipeline stage shares, and the per-block ledger configuration consensus
//! runs against.
//!
//! ## Architecture
//!
//! - **transaction** — Decoding, hashing, sender recovery, pipeline flags and
//!   the submit callback. A transaction is shared as `Arc<Transaction>`;
//!   its hash and sender are computed at most once, whatever the contention.
//! - **ledger** — `LedgerConfig` snapshots and their monotonic publication.
//! - **crypto** — The `CryptoSuite` seam and its Ed25519 implementation.
//! - **types** — Fixed-width hashes, addresses and nonces.
//! - **config** — Protocol constants and `ProtocolConfig`.
//! - **logging** — `tracing` subscriber setup for embedding binaries.
//!
//! ## Design Philosophy
//!
//! 1. Decoding never trusts input; verification never trusts decoding.
//! 2. Readers of cached values never block once the value exists.
//! 3. Snapshots are immutable once published.

pub mod config;
pub mod crypto;
pub mod ledger;
pub mod logging;
pub mod transaction;
pub mod types;
