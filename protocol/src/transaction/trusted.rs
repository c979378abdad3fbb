//! Privileged sender installation for block replay.
//!
//! When a node replays a block whose senders were already recovered by the
//! proposer and agreed on by consensus, it can skip signature recovery and
//! install the known senders directly. That bypasses verification, so it is
//! kept off [`Transaction`]'s public surface. [`TrustedSender::force_sender`]
//! demands a [`ReplayAuthority`], and only this crate's replay path can mint
//! one; outside code goes through [`replay_with_known_senders`].

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::tx::Transaction;
use crate::types::Address;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("sender count mismatch: {transactions} transactions, {senders} senders")]
    LengthMismatch { transactions: usize, senders: usize },
}

/// Proof that the caller is the block replay path.
///
/// Cannot be built outside this crate:
///
/// ```compile_fail
/// use keel_protocol::transaction::ReplayAuthority;
///
/// let authority = ReplayAuthority::new();
/// ```
#[derive(Debug)]
pub struct ReplayAuthority {
    _private: (),
}

impl ReplayAuthority {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// Unconditional sender overwrite for trusted pipeline stages.
pub trait TrustedSender {
    /// Replace the cached sender, whatever it was. A later
    /// [`Transaction::verify`] returns this sender without recovery.
    fn force_sender(&self, authority: &ReplayAuthority, sender: Address);
}

impl TrustedSender for Transaction {
    fn force_sender(&self, _authority: &ReplayAuthority, sender: Address) {
        Transaction::force_sender(self, sender);
    }
}

/// Install consensus-agreed senders on a replayed block's transactions.
///
/// `senders[i]` belongs to `txs[i]`. Nothing is installed if the lengths
/// differ.
pub fn replay_with_known_senders(
    txs: &[Arc<Transaction>],
    senders: &[Address],
) -> Result<(), ReplayError> {
    if txs.len() != senders.len() {
        return Err(ReplayError::LengthMismatch {
            transactions: txs.len(),
            senders: senders.len(),
        });
    }
    let authority = ReplayAuthority::new();
    for (tx, sender) in txs.iter().zip(senders) {
        TrustedSender::force_sender(tx.as_ref(), &authority, *sender);
    }
    debug!(count = txs.len(), "installed replayed senders");
    Ok(())
}
