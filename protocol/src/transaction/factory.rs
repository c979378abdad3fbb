//! Creates transactions bound to the node's crypto suite and codec.

use std::sync::Arc;

use super::builder::TransactionBuilder;
use super::codec::{CanonicalCodec, DecodeError, TransactionCodec, TransactionFields};
use super::tx::Transaction;
use crate::config::ProtocolConfig;
use crate::crypto::{CryptoSuite, Ed25519Suite};

/// Every transaction a node handles shares one suite and one codec; the
/// factory hands them out.
#[derive(Debug, Clone)]
pub struct TransactionFactory {
    suite: Arc<dyn CryptoSuite>,
    codec: Arc<dyn TransactionCodec>,
    config: ProtocolConfig,
}

impl TransactionFactory {
    /// Ed25519 with the configured hash, canonical codec with the configured
    /// size limit.
    pub fn new(config: ProtocolConfig) -> Self {
        let suite = Arc::new(Ed25519Suite::new(config.hash_algorithm));
        let codec = Arc::new(CanonicalCodec::new(config.max_tx_size));
        Self {
            suite,
            codec,
            config,
        }
    }

    /// Use custom collaborators.
    pub fn with_parts(
        config: ProtocolConfig,
        suite: Arc<dyn CryptoSuite>,
        codec: Arc<dyn TransactionCodec>,
    ) -> Self {
        Self {
            suite,
            codec,
            config,
        }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn crypto_suite(&self) -> &Arc<dyn CryptoSuite> {
        &self.suite
    }

    pub fn codec(&self) -> &Arc<dyn TransactionCodec> {
        &self.codec
    }

    /// Decode a transaction received from a peer or client.
    pub fn decode(
        &self,
        data: &[u8],
        check_signature: bool,
    ) -> Result<Arc<Transaction>, DecodeError> {
        Transaction::decode(
            data,
            check_signature,
            Arc::clone(&self.suite),
            Arc::clone(&self.codec),
        )
        .map(Arc::new)
    }

    /// A builder preset with this node's chain and group ids.
    pub fn builder(&self) -> TransactionBuilder {
        TransactionBuilder::new()
            .chain_id(self.config.chain_id.clone())
            .group_id(self.config.group_id.clone())
    }

    pub fn create(&self, fields: TransactionFields) -> Arc<Transaction> {
        Arc::new(Transaction::new(
            fields,
            Arc::clone(&self.suite),
            Arc::clone(&self.codec),
        ))
    }
}

impl Default for TransactionFactory {
    fn default() -> Self {
        Self::new(ProtocolConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{HashAlgorithm, KeyPair};
    use crate::transaction::signing::sign_transaction;
    use crate::types::Nonce;

    #[test]
    fn builder_uses_configured_ids() {
        let config = ProtocolConfig {
            chain_id: "testnet".to_string(),
            group_id: "group9".to_string(),
            ..ProtocolConfig::default()
        };
        let fields = TransactionFactory::new(config).builder().build_fields();
        assert_eq!(fields.chain_id, "testnet");
        assert_eq!(fields.group_id, "group9");
    }

    #[test]
    fn decode_roundtrips_created_transaction() {
        let factory = TransactionFactory::default();
        let keypair = KeyPair::generate();
        let mut fields = factory.builder().nonce(Nonce::from(7u64)).build_fields();
        sign_transaction(
            &mut fields,
            factory.codec().as_ref(),
            &Ed25519Suite::default(),
            &keypair,
        );

        let tx = factory.create(fields);
        let decoded = factory.decode(&tx.encode(), true).unwrap();
        assert_eq!(decoded.hash(), tx.hash());
        assert_eq!(decoded.verify().unwrap(), tx.verify().unwrap());
    }

    #[test]
    fn decode_rejects_wrong_signature_length() {
        let factory = TransactionFactory::default();
        let mut fields = factory.builder().build_fields();
        fields.signature = vec![0u8; 10];
        let bytes = factory.codec().encode(&fields, true);
        assert_eq!(
            factory.decode(&bytes, true).unwrap_err(),
            DecodeError::MalformedSignature {
                expected: 96,
                actual: 10
            }
        );
        assert!(factory.decode(&bytes, false).is_ok());
    }

    #[test]
    fn hash_algorithm_changes_hash() {
        let fields = TransactionFactory::default().builder().build_fields();
        let blake = TransactionFactory::default().create(fields.clone());
        let sha = TransactionFactory::new(ProtocolConfig {
            hash_algorithm: HashAlgorithm::Sha256,
            ..ProtocolConfig::default()
        })
        .create(fields);
        assert_ne!(blake.hash(), sha.hash());
    }
}
