//! # Transaction Module
//!
//! The shared transaction entity and everything needed to create, encode,
//! sign and verify it.
//!
//! ## Architecture
//!
//! ```text
//! types.rs    — TransactionType and TransactionStatus
//! codec.rs    — TransactionFields, the TransactionCodec trait, CanonicalCodec
//! tx.rs       — Transaction: memoized hash and sender, flags, submit callback
//! builder.rs  — Fluent TransactionBuilder for unsigned fields
//! signing.rs  — Ed25519 signing of transaction fields
//! factory.rs  — TransactionFactory binding suite and codec
//! submit.rs   — Submission results and the callback contract
//! sealing.rs  — Selecting pool transactions for a proposal
//! trusted.rs  — Sender installation for block replay
//! error.rs    — TransactionError
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — [`TransactionBuilder`] (or [`TransactionFactory::builder`]).
//! 2. **Sign** — [`sign_transaction`] with the sender's keypair.
//! 3. **Decode** — peers decode with [`TransactionFactory::decode`].
//! 4. **Verify** — [`Transaction::verify`] recovers and caches the sender.
//! 5. **Seal** — [`select_for_sealing`] marks transactions for a proposal.
//! 6. **Notify** — the commit path fires the submit callback once.

pub mod builder;
pub mod codec;
pub mod error;
pub mod factory;
pub mod sealing;
pub mod signing;
pub mod submit;
pub mod trusted;
pub mod tx;
pub mod types;

pub use builder::TransactionBuilder;
pub use codec::{CanonicalCodec, DecodeError, TransactionCodec, TransactionFields};
pub use error::TransactionError;
pub use factory::TransactionFactory;
pub use sealing::{release_sealed, select_for_sealing};
pub use signing::sign_transaction;
pub use submit::{SubmitError, SubmitOutcome, TransactionSubmitResult, TxSubmitCallback};
pub use trusted::{replay_with_known_senders, ReplayAuthority, ReplayError, TrustedSender};
pub use tx::{Transaction, Transactions};
pub use types::{TransactionStatus, TransactionType};
