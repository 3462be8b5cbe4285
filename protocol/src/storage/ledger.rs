//! # Ledger: the Chain Manager
//!
//! Owns the chain and serializes every append. The chain sits behind a
//! `parking_lot::RwLock`: appends take the write lock for the whole
//! read-tip / seal / validate / commit sequence, so two writers can never
//! derive a record from the same tip. Readers share the read lock and
//! always see a fully committed sequence.
//!
//! Nothing outside this type holds a reference into the sequence; lookups
//! return clones.

use std::sync::Arc;

use parking_lot::RwLock;

use super::chain::Chain;
use super::codec::encode_payload;
use super::error::StorageError;
use super::record::Record;
use super::validation::IntegrityIssue;
use crate::clock::Clock;

/// Thread-safe, in-memory record chain.
pub struct Ledger {
    chain: RwLock<Chain>,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    /// Create a ledger and seed it with the genesis record.
    ///
    /// A failed bootstrap is logged and leaves the ledger empty; check
    /// [`height`](Self::height) before relying on genesis being present.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let ledger = Self::empty(clock);
        ledger.initialize();
        ledger
    }

    /// Create a ledger with no records at all.
    pub fn empty(clock: Arc<dyn Clock>) -> Self {
        Self {
            chain: RwLock::new(Chain::new()),
            clock,
        }
    }

    /// Append the genesis record if the chain is empty. Idempotent.
    ///
    /// Errors are logged, not returned: an empty ledger is inert and safe.
    pub fn initialize(&self) {
        let mut chain = self.chain.write();
        if !chain.is_empty() {
            return;
        }

        let result = Record::genesis_body()
            .map_err(StorageError::from)
            .and_then(|body| chain.append(body, self.clock.now_secs()));
        match result {
            Ok(genesis) => {
                tracing::info!(hash = %genesis.hash, "genesis record created");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create genesis record");
            }
        }
    }

    /// Encode `payload` and append it as the next record.
    ///
    /// The record is only committed if the chain including it validates.
    pub fn append<T: serde::Serialize>(&self, payload: &T) -> Result<Record, StorageError> {
        let body = encode_payload(payload)?;
        self.append_encoded(body)
    }

    /// Append an already-encoded payload.
    pub fn append_encoded(&self, body: String) -> Result<Record, StorageError> {
        let mut chain = self.chain.write();
        let timestamp = self.clock.now_secs();

        match chain.append(body, timestamp) {
            Ok(record) => {
                tracing::info!(
                    height = record.height,
                    hash = %record.hash,
                    "record appended"
                );
                Ok(record)
            }
            Err(e) => {
                if let StorageError::Integrity(issues) = &e {
                    tracing::warn!(issues = issues.len(), "append rejected: chain failed validation");
                }
                Err(e)
            }
        }
    }

    /// Height of the latest record; `None` before genesis exists.
    pub fn height(&self) -> Option<u64> {
        self.chain.read().height()
    }

    /// Number of records, genesis included.
    pub fn len(&self) -> usize {
        self.chain.read().len()
    }

    /// `true` if not even genesis exists.
    pub fn is_empty(&self) -> bool {
        self.chain.read().is_empty()
    }

    /// First record whose hash equals `hash`.
    pub fn get_by_hash(&self, hash: &str) -> Option<Record> {
        self.chain.read().find_by_hash(hash).cloned()
    }

    /// The record at `height`.
    pub fn get_by_height(&self, height: u64) -> Option<Record> {
        self.chain.read().find_by_height(height).cloned()
    }

    /// A consistent copy of the whole sequence.
    pub fn records(&self) -> Vec<Record> {
        self.chain.read().records().to_vec()
    }

    /// Validate the whole chain. Empty means valid.
    pub fn validate_chain(&self) -> Vec<IntegrityIssue> {
        self.chain.read().validate()
    }

    /// Run `f` over the records under a single read lock.
    pub fn with_records<R>(&self, f: impl FnOnce(&[Record]) -> R) -> R {
        f(self.chain.read().records())
    }

    #[cfg(test)]
    pub(crate) fn tamper<R>(&self, f: impl FnOnce(&mut Vec<Record>) -> R) -> R {
        f(self.chain.write().records_mut())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}
