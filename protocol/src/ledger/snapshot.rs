//! The per-block ledger configuration snapshot.
//!
//! A [`LedgerConfig`] describes the consensus parameters in force right after
//! a given block: who the consensus and observer nodes are, the round timeout
//! and the per-block transaction cap. The commit path builds a fresh one after
//! every block and publishes it as `Arc<LedgerConfig>`. Nothing mutates a
//! snapshot after publication, so readers never lock it.

use bincode::Options;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::node::{ConsensusNode, ConsensusNodeList};
use crate::config::{
    DEFAULT_BLOCK_TX_COUNT_LIMIT, DEFAULT_CONSENSUS_TIMEOUT_MS, MAX_LEDGER_SNAPSHOT_BYTES,
};
use crate::types::H256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    consensus_node_list: ConsensusNodeList,
    observer_node_list: ConsensusNodeList,
    /// Ledger state hash at `block_number`.
    hash: H256,
    block_number: i64,
    /// Milliseconds.
    consensus_timeout: u64,
    block_tx_count_limit: u64,
}

fn snapshot_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_LEDGER_SNAPSHOT_BYTES)
}

impl LedgerConfig {
    /// Empty node lists, zero hash, block 0, default timeout and cap.
    pub fn new() -> Self {
        Self {
            consensus_node_list: ConsensusNodeList::new(),
            observer_node_list: ConsensusNodeList::new(),
            hash: H256::zero(),
            block_number: 0,
            consensus_timeout: DEFAULT_CONSENSUS_TIMEOUT_MS,
            block_tx_count_limit: DEFAULT_BLOCK_TX_COUNT_LIMIT,
        }
    }

    // -- setters ------------------------------------------------------------

    /// Copies `nodes` in. Later changes to the caller's list do not reach
    /// this snapshot.
    pub fn set_consensus_node_list(&mut self, nodes: &[ConsensusNode]) {
        self.consensus_node_list = ConsensusNodeList::from(nodes);
    }

    pub fn set_observer_node_list(&mut self, nodes: &[ConsensusNode]) {
        self.observer_node_list = ConsensusNodeList::from(nodes);
    }

    pub fn set_hash(&mut self, hash: H256) {
        self.hash = hash;
    }

    pub fn set_block_number(&mut self, block_number: i64) {
        self.block_number = block_number;
    }

    pub fn set_consensus_timeout(&mut self, timeout_ms: u64) {
        self.consensus_timeout = timeout_ms;
    }

    pub fn set_block_tx_count_limit(&mut self, limit: u64) {
        self.block_tx_count_limit = limit;
    }

    // -- accessors ----------------------------------------------------------

    pub fn consensus_node_list(&self) -> &ConsensusNodeList {
        &self.consensus_node_list
    }

    pub fn observer_node_list(&self) -> &ConsensusNodeList {
        &self.observer_node_list
    }

    /// The ledger state hash.
    pub fn hash(&self) -> H256 {
        self.hash
    }

    pub fn block_number(&self) -> i64 {
        self.block_number
    }

    pub fn consensus_timeout(&self) -> u64 {
        self.consensus_timeout
    }

    pub fn block_tx_count_limit(&self) -> u64 {
        self.block_tx_count_limit
    }

    // -- sync encoding ------------------------------------------------------

    /// Binary form exchanged with peers during ledger sync.
    pub fn encode(&self) -> Result<Vec<u8>, LedgerError> {
        snapshot_options()
            .serialize(self)
            .map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, LedgerError> {
        snapshot_options()
            .deserialize(bytes)
            .map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::node::NodeId;

    fn nodes(n: u8) -> Vec<ConsensusNode> {
        (1..=n)
            .map(|i| ConsensusNode::new(NodeId::new([i; 32]), u64::from(i)))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = LedgerConfig::new();
        assert!(config.consensus_node_list().is_empty());
        assert!(config.observer_node_list().is_empty());
        assert!(config.hash().is_zero());
        assert_eq!(config.block_number(), 0);
        assert_eq!(config.consensus_timeout(), DEFAULT_CONSENSUS_TIMEOUT_MS);
        assert_eq!(config.block_tx_count_limit(), DEFAULT_BLOCK_TX_COUNT_LIMIT);
    }

    #[test]
    fn hash_returns_state_hash_not_block_number() {
        let mut config = LedgerConfig::new();
        let state = H256::new([0x5A; 32]);
        config.set_hash(state);
        config.set_block_number(42);
        assert_eq!(config.hash(), state);
        assert_eq!(config.block_number(), 42);
    }

    #[test]
    fn node_lists_are_copied_in() {
        let mut source = nodes(3);
        let mut config = LedgerConfig::new();
        config.set_consensus_node_list(&source);
        config.set_observer_node_list(&source[..1]);

        source.clear();
        assert_eq!(config.consensus_node_list().len(), 3);
        assert_eq!(config.observer_node_list().len(), 1);
    }

    #[test]
    fn setters_assign() {
        let mut config = LedgerConfig::new();
        config.set_consensus_timeout(1_500);
        config.set_block_tx_count_limit(10);
        assert_eq!(config.consensus_timeout(), 1_500);
        assert_eq!(config.block_tx_count_limit(), 10);
    }

    #[test]
    fn snapshot_encoding_roundtrip() {
        let mut config = LedgerConfig::new();
        config.set_consensus_node_list(&nodes(4));
        config.set_observer_node_list(&nodes(1));
        config.set_hash(H256::new([7; 32]));
        config.set_block_number(10);
        let bytes = config.encode().unwrap();
        assert_eq!(LedgerConfig::decode(&bytes).unwrap(), config);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            LedgerConfig::decode(&[0xFF; 7]),
            Err(LedgerError::Serialization(_))
        ));
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let mut bytes = LedgerConfig::new().encode().unwrap();
        bytes.push(0);
        assert!(LedgerConfig::decode(&bytes).is_err());
    }
}
