//! Publication of ledger snapshots from the commit path.
//!
//! The commit path is the only writer. Consensus, the sealer and the pool
//! hold [`watch::Receiver`]s and always see the newest snapshot; a snapshot
//! they already cloned out stays valid for as long as they keep the `Arc`.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::error::LedgerError;
use super::snapshot::LedgerConfig;

#[derive(Debug)]
pub struct LedgerConfigPublisher {
    tx: watch::Sender<Option<Arc<LedgerConfig>>>,
}

impl LedgerConfigPublisher {
    /// A publisher with nothing published yet.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Validate and publish a snapshot built after a commit.
    ///
    /// The block number must be strictly greater than the last published
    /// one. The check and the store happen under the channel's write lock,
    /// so concurrent publishers cannot interleave.
    pub fn publish(&self, config: LedgerConfig) -> Result<Arc<LedgerConfig>, LedgerError> {
        validate(&config).map_err(|err| {
            warn!(block_number = config.block_number(), error = %err, "rejected ledger config");
            err
        })?;

        let config = Arc::new(config);
        let mut outcome = Ok(());
        self.tx.send_if_modified(|current| {
            if let Some(previous) = current {
                if config.block_number() <= previous.block_number() {
                    outcome = Err(LedgerError::ConfigInconsistency {
                        previous: previous.block_number(),
                        next: config.block_number(),
                    });
                    return false;
                }
            }
            *current = Some(Arc::clone(&config));
            true
        });

        if let Err(err) = outcome {
            warn!(error = %err, "rejected ledger config");
            return Err(err);
        }

        info!(
            block_number = config.block_number(),
            hash = %config.hash(),
            consensus_nodes = config.consensus_node_list().len(),
            observer_nodes = config.observer_node_list().len(),
            consensus_timeout_ms = config.consensus_timeout(),
            block_tx_count_limit = config.block_tx_count_limit(),
            "published ledger config"
        );
        Ok(config)
    }

    /// The most recent snapshot, if any.
    pub fn latest(&self) -> Option<Arc<LedgerConfig>> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<LedgerConfig>>> {
        self.tx.subscribe()
    }
}

impl Default for LedgerConfigPublisher {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(config: &LedgerConfig) -> Result<(), LedgerError> {
    if config.block_number() < 0 {
        return Err(LedgerError::InvalidParameter {
            field: "block_number",
            reason: "must not be negative",
        });
    }
    if config.consensus_timeout() == 0 {
        return Err(LedgerError::InvalidParameter {
            field: "consensus_timeout",
            reason: "must be positive",
        });
    }
    if config.block_tx_count_limit() == 0 {
        return Err(LedgerError::InvalidParameter {
            field: "block_tx_count_limit",
            reason: "must be positive",
        });
    }
    Ok(())
}
