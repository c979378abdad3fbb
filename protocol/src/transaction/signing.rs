//! Signing transaction fields with an Ed25519 keypair.
//!
//! Signing is a separate step from building because the keypair may not be
//! available at construction time (hardware wallet, remote signer). The
//! signed message is the transaction hash, i.e. the suite hash of the
//! hash-fields encoding, which excludes the signature itself.

use super::codec::{TransactionCodec, TransactionFields};
use crate::crypto::{CryptoSuite, Ed25519Suite, KeyPair};
use crate::types::H256;

/// Signs `fields` in place and returns the transaction hash that was signed.
///
/// Any existing signature is overwritten. The returned hash is the one a
/// [`Transaction`](super::Transaction) built from the same fields, codec and
/// suite will report.
pub fn sign_transaction(
    fields: &mut TransactionFields,
    codec: &dyn TransactionCodec,
    suite: &Ed25519Suite,
    keypair: &KeyPair,
) -> H256 {
    let hash = suite.hash(&codec.encode(fields, false));
    fields.signature = suite.sign(keypair, &hash);
    hash
}
