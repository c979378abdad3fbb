//! Consensus and observer node lists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PUBLIC_KEY_LENGTH;
use crate::crypto::PublicKey;
use crate::types::TypeError;

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// A node's identity: the bytes of its public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId([u8; PUBLIC_KEY_LENGTH]);

impl NodeId {
    pub const fn new(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            raw.as_slice()
                .try_into()
                .map_err(|_| TypeError::InvalidLength {
                    expected: PUBLIC_KEY_LENGTH,
                    actual: raw.len(),
                })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<PublicKey> for NodeId {
    fn from(key: PublicKey) -> Self {
        Self(*key.as_bytes())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps node lists readable in logs.
        write!(f, "NodeId({}..)", &self.to_hex()[..8])
    }
}

// ---------------------------------------------------------------------------
// ConsensusNode
// ---------------------------------------------------------------------------

/// A node participating in (or observing) consensus at some block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsensusNode {
    pub node_id: NodeId,
    /// Voting weight. Observers carry weight but do not vote.
    pub weight: u64,
}

impl ConsensusNode {
    pub fn new(node_id: NodeId, weight: u64) -> Self {
        Self { node_id, weight }
    }
}

// ---------------------------------------------------------------------------
// ConsensusNodeList
// ---------------------------------------------------------------------------

/// An ordered node list. Order is significant: consensus uses a node's index
/// in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusNodeList {
    nodes: Vec<ConsensusNode>,
}

impl ConsensusNodeList {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[ConsensusNode] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&ConsensusNode> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConsensusNode> {
        self.nodes.iter()
    }

    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.index_of(node_id).is_some()
    }

    pub fn index_of(&self, node_id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| &n.node_id == node_id)
    }

    /// Sum of all weights. Saturates instead of overflowing.
    pub fn total_weight(&self) -> u64 {
        self.nodes
            .iter()
            .fold(0u64, |acc, n| acc.saturating_add(n.weight))
    }

    /// BFT quorum: 2/3 + 1 of the total weight, or 0 for an empty list.
    pub fn quorum_weight(&self) -> u64 {
        let total = self.total_weight();
        if total == 0 {
            return 0;
        }
        // u128 so large weights cannot overflow the multiplication.
        ((2 * total as u128) / 3 + 1) as u64
    }
}

impl From<Vec<ConsensusNode>> for ConsensusNodeList {
    fn from(nodes: Vec<ConsensusNode>) -> Self {
        Self { nodes }
    }
}

impl From<&[ConsensusNode]> for ConsensusNodeList {
    fn from(nodes: &[ConsensusNode]) -> Self {
        Self {
            nodes: nodes.to_vec(),
        }
    }
}

impl<'a> IntoIterator for &'a ConsensusNodeList {
    type Item = &'a ConsensusNode;
    type IntoIter = std::slice::Iter<'a, ConsensusNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
