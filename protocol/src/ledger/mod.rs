//! # Ledger Module
//!
//! Per-block consensus configuration and its publication.
//!
//! ```text
//! node.rs      — NodeId, ConsensusNode, ConsensusNodeList
//! snapshot.rs  — LedgerConfig, the immutable-once-published snapshot
//! publisher.rs — LedgerConfigPublisher, monotonic publication via tokio::sync::watch
//! error.rs     — LedgerError
//! ```

pub mod error;
pub mod node;
pub mod publisher;
pub mod snapshot;

pub use error::LedgerError;
pub use node::{ConsensusNode, ConsensusNodeList, NodeId};
pub use publisher::LedgerConfigPublisher;
pub use snapshot::LedgerConfig;
