//! The shared, thread-safe transaction entity.
//!
//! A [`Transaction`] is created once (decoded from the network or built
//! locally) and then shared as `Arc<Transaction>` between the pool, the
//! sealer, consensus and execution. The signed fields never change. What does
//! change is held behind interior mutability:
//!
//! - the memoized hash and sender, each behind a `parking_lot::RwLock` so
//!   readers never block once the value is cached;
//! - the pipeline flags (`synced`, `sealed`, `invalid`), plain atomics;
//! - the submit callback, behind a mutex that is never held while the
//!   callback runs.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock, RwLockUpgradableReadGuard};
use tracing::{debug, trace, warn};

use super::codec::{DecodeError, TransactionCodec, TransactionFields};
use super::error::TransactionError;
use super::submit::{SubmitOutcome, TxSubmitCallback};
use super::types::TransactionType;
use crate::crypto::CryptoSuite;
use crate::types::{Address, Nonce, H256};

/// Transactions shared between pipeline stages.
pub type Transactions = Vec<Arc<Transaction>>;

pub struct Transaction {
    fields: TransactionFields,
    suite: Arc<dyn CryptoSuite>,
    codec: Arc<dyn TransactionCodec>,

    /// Node-local arrival time in milliseconds. Not part of the hash.
    import_time: AtomicI64,

    hash: RwLock<Option<H256>>,
    sender: RwLock<Option<Address>>,

    /// Received from or sent to peers.
    synced: AtomicBool,
    /// Picked by the leader for a block proposal.
    sealed: AtomicBool,
    /// Failed verification.
    invalid: AtomicBool,

    submit_callback: Mutex<Option<TxSubmitCallback>>,
}

impl Transaction {
    /// Wrap already-parsed fields. The import time is stamped with the
    /// current wall clock.
    pub fn new(
        fields: TransactionFields,
        suite: Arc<dyn CryptoSuite>,
        codec: Arc<dyn TransactionCodec>,
    ) -> Self {
        Self {
            fields,
            suite,
            codec,
            import_time: AtomicI64::new(Utc::now().timestamp_millis()),
            hash: RwLock::new(None),
            sender: RwLock::new(None),
            synced: AtomicBool::new(false),
            sealed: AtomicBool::new(false),
            invalid: AtomicBool::new(false),
            submit_callback: Mutex::new(None),
        }
    }

    /// Decode a transaction from its full encoding.
    ///
    /// With `check_signature`, a missing signature or one whose length does
    /// not match the suite is rejected here. The signature is not verified;
    /// call [`verify`](Self::verify) for that.
    pub fn decode(
        data: &[u8],
        check_signature: bool,
        suite: Arc<dyn CryptoSuite>,
        codec: Arc<dyn TransactionCodec>,
    ) -> Result<Self, DecodeError> {
        let fields = codec.decode(data, check_signature).map_err(|err| {
            debug!(error = %err, len = data.len(), "rejecting malformed transaction");
            err
        })?;

        if check_signature && fields.signature.len() != suite.signature_length() {
            let err = DecodeError::MalformedSignature {
                expected: suite.signature_length(),
                actual: fields.signature.len(),
            };
            debug!(error = %err, "rejecting transaction with malformed signature");
            return Err(err);
        }

        Ok(Self::new(fields, suite, codec))
    }

    // -- encoding -----------------------------------------------------------

    /// Full encoding, signature included, for transport and storage.
    pub fn encode(&self) -> Vec<u8> {
        self.codec.encode(&self.fields, true)
    }

    /// Encoding of the hash fields only: everything except the signature.
    pub fn encode_hash_fields(&self) -> Vec<u8> {
        self.codec.encode(&self.fields, false)
    }

    // -- hash ---------------------------------------------------------------

    /// The transaction hash, computed on first use and cached.
    ///
    /// The hash is computed at most once per transaction even when many
    /// threads ask at the same time: only one thread can hold the upgradable
    /// guard, and it re-checks the cache before computing.
    pub fn hash(&self) -> H256 {
        if let Some(hash) = *self.hash.read() {
            return hash;
        }

        let guard = self.hash.upgradable_read();
        if let Some(hash) = *guard {
            return hash;
        }
        let hash = self.suite.hash(&self.encode_hash_fields());
        let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
        *guard = Some(hash);
        trace!(%hash, "transaction hash computed");
        hash
    }

    // -- sender -------------------------------------------------------------

    /// The recovered sender, or `None` until [`verify`](Self::verify)
    /// succeeds or a trusted stage installs one.
    pub fn sender(&self) -> Option<Address> {
        *self.sender.read()
    }

    /// Recover and cache the sender from the signature.
    ///
    /// Returns the cached sender straight away if one is present, including
    /// one installed through [`TrustedSender`](super::trusted::TrustedSender).
    /// Concurrent first callers serialize on the sender lock, so recovery
    /// runs at most once.
    ///
    /// On failure the sender stays empty and the transaction is marked
    /// invalid.
    pub fn verify(&self) -> Result<Address, TransactionError> {
        if let Some(sender) = *self.sender.read() {
            return Ok(sender);
        }

        let guard = self.sender.upgradable_read();
        if let Some(sender) = *guard {
            return Ok(sender);
        }

        let hash = self.hash();
        match self.suite.recover(&hash, &self.fields.signature) {
            Ok(public_key) => {
                let sender = self.suite.calculate_address(&public_key);
                let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
                *guard = Some(sender);
                debug!(%hash, %sender, "transaction signature verified");
                Ok(sender)
            }
            Err(source) => {
                drop(guard);
                self.set_invalid(true);
                warn!(%hash, error = %source, "transaction signature verification failed");
                Err(TransactionError::SignatureInvalid { hash, source })
            }
        }
    }

    /// Unconditionally overwrite the cached sender.
    pub(crate) fn force_sender(&self, sender: Address) {
        *self.sender.write() = Some(sender);
    }

    // -- signed fields ------------------------------------------------------

    pub fn fields(&self) -> &TransactionFields {
        &self.fields
    }

    pub fn version(&self) -> i32 {
        self.fields.version
    }

    pub fn chain_id(&self) -> &str {
        &self.fields.chain_id
    }

    pub fn group_id(&self) -> &str {
        &self.fields.group_id
    }

    pub fn block_limit(&self) -> i64 {
        self.fields.block_limit
    }

    pub fn nonce(&self) -> Nonce {
        self.fields.nonce
    }

    pub fn to(&self) -> Option<Address> {
        self.fields.to
    }

    pub fn input(&self) -> &[u8] {
        &self.fields.input
    }

    pub fn signature_data(&self) -> &[u8] {
        &self.fields.signature
    }

    /// Derived from the recipient and input; see [`TransactionType`].
    pub fn tx_type(&self) -> TransactionType {
        match (&self.fields.to, self.fields.input.is_empty()) {
            (Some(_), _) => TransactionType::MessageCall,
            (None, false) => TransactionType::ContractCreation,
            (None, true) => TransactionType::NullTransaction,
        }
    }

    pub fn crypto_suite(&self) -> &Arc<dyn CryptoSuite> {
        &self.suite
    }

    // -- transport metadata -------------------------------------------------

    pub fn import_time(&self) -> i64 {
        self.import_time.load(Ordering::Relaxed)
    }

    pub fn set_import_time(&self, millis: i64) {
        self.import_time.store(millis, Ordering::Relaxed);
    }

    // -- pipeline flags -----------------------------------------------------

    pub fn synced(&self) -> bool {
        self.synced.load(Ordering::Acquire)
    }

    pub fn set_synced(&self, synced: bool) {
        self.synced.store(synced, Ordering::Release);
    }

    pub fn sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    pub fn set_sealed(&self, sealed: bool) {
        self.sealed.store(sealed, Ordering::Release);
    }

    /// Mark the transaction sealed if no other sealer got there first.
    /// Returns `true` if this call did the marking.
    pub fn try_seal(&self) -> bool {
        self.sealed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn invalid(&self) -> bool {
        self.invalid.load(Ordering::Acquire)
    }

    pub fn set_invalid(&self, invalid: bool) {
        self.invalid.store(invalid, Ordering::Release);
    }

    // -- submit callback ----------------------------------------------------

    /// Attach the callback to fire when the transaction reaches a final
    /// outcome. Replaces any callback that has not fired yet.
    ///
    /// The replaced callback is dropped after the lock is released, so
    /// whatever it captured may touch this transaction from its `Drop`.
    pub fn set_submit_callback(&self, callback: TxSubmitCallback) {
        let previous = self.submit_callback.lock().replace(callback);
        if previous.is_some() {
            debug!(hash = ?*self.hash.read(), "replaced pending submit callback");
        }
        drop(previous);
    }

    pub fn has_submit_callback(&self) -> bool {
        self.submit_callback.lock().is_some()
    }

    /// Detach the callback without firing it.
    pub fn take_submit_callback(&self) -> Option<TxSubmitCallback> {
        self.submit_callback.lock().take()
    }

    /// Fire the submit callback with the final outcome.
    ///
    /// The callback is removed before it runs and is invoked with no lock
    /// held, so it may freely call back into this transaction. Returns
    /// `false` if there was no callback (never set, or already fired).
    pub fn notify_submit_result(&self, outcome: SubmitOutcome) -> bool {
        let Some(callback) = self.take_submit_callback() else {
            return false;
        };
        callback(outcome);
        true
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("fields", &self.fields)
            .field("hash", &*self.hash.read())
            .field("sender", &*self.sender.read())
            .field("import_time", &self.import_time())
            .field("synced", &self.synced())
            .field("sealed", &self.sealed())
            .field("invalid", &self.invalid())
            .field("has_submit_callback", &self.has_submit_callback())
            .finish()
    }
}
