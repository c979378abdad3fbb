//! Picking pool transactions for a block proposal.

use std::sync::Arc;

use tracing::debug;

use super::tx::{Transaction, Transactions};
use crate::ledger::LedgerConfig;

/// Select up to `config.block_tx_count_limit()` transactions for sealing.
///
/// Candidates are taken in order. Invalid transactions and ones already
/// sealed by a concurrent proposal are skipped. Every returned transaction
/// has been marked sealed by this call.
pub fn select_for_sealing(candidates: &[Arc<Transaction>], config: &LedgerConfig) -> Transactions {
    let limit = usize::try_from(config.block_tx_count_limit()).unwrap_or(usize::MAX);
    let mut picked = Transactions::with_capacity(limit.min(candidates.len()));

    for tx in candidates {
        if picked.len() >= limit {
            break;
        }
        if tx.invalid() {
            continue;
        }
        if tx.try_seal() {
            picked.push(Arc::clone(tx));
        }
    }

    debug!(
        block_number = config.block_number(),
        candidates = candidates.len(),
        picked = picked.len(),
        "selected transactions for sealing"
    );
    picked
}

/// Return transactions from an abandoned proposal to the pool.
pub fn release_sealed(txs: &[Arc<Transaction>]) {
    for tx in txs {
        tx.set_sealed(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Ed25519Suite;
    use crate::transaction::codec::CanonicalCodec;
    use crate::transaction::TransactionBuilder;

    fn pool(n: usize) -> Transactions {
        (0..n)
            .map(|_| {
                Arc::new(Transaction::new(
                    TransactionBuilder::new().build_fields(),
                    Arc::new(Ed25519Suite::default()),
                    Arc::new(CanonicalCodec::default()),
                ))
            })
            .collect()
    }

    fn config_with_limit(limit: u64) -> LedgerConfig {
        let mut config = LedgerConfig::new();
        config.set_block_tx_count_limit(limit);
        config
    }

    #[test]
    fn respects_count_limit() {
        let txs = pool(5);
        let picked = select_for_sealing(&txs, &config_with_limit(3));
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|tx| tx.sealed()));
        assert!(!txs[3].sealed() && !txs[4].sealed());
    }

    #[test]
    fn skips_sealed_and_invalid() {
        let txs = pool(4);
        txs[0].set_sealed(true);
        txs[1].set_invalid(true);
        let picked = select_for_sealing(&txs, &config_with_limit(10));
        assert_eq!(picked.len(), 2);
        assert!(Arc::ptr_eq(&picked[0], &txs[2]));
        assert!(Arc::ptr_eq(&picked[1], &txs[3]));
    }

    #[test]
    fn second_proposal_gets_nothing_until_released() {
        let txs = pool(2);
        let config = config_with_limit(10);
        let first = select_for_sealing(&txs, &config);
        assert_eq!(first.len(), 2);
        assert!(select_for_sealing(&txs, &config).is_empty());

        release_sealed(&first);
        assert_eq!(select_for_sealing(&txs, &config).len(), 2);
    }
}
