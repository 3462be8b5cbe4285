//! In-memory chain: the ordered, append-only record sequence.
//!
//! `Chain` is plain data with no locking. [`Ledger`](super::Ledger) wraps it
//! to provide the single-writer guarantee.

use super::error::StorageError;
use super::record::Record;
use super::validation::{validate_records, IntegrityIssue};

/// Ordered chain of records.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    records: Vec<Record>,
}

impl Chain {
    /// An empty chain with no genesis record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seal `body` into the next record and append it.
    ///
    /// Height and predecessor hash are derived from the current tip (an empty
    /// chain gets a genesis record at height 0). The candidate is validated
    /// together with the existing records before it is kept; on any issue it
    /// is dropped and the chain is left exactly as it was.
    pub fn append(&mut self, body: String, timestamp: u64) -> Result<Record, StorageError> {
        let (height, previous_hash) = match self.records.last() {
            Some(tip) => (tip.height + 1, Some(tip.hash.clone())),
            None => (0, None),
        };
        let record = Record::seal(height, timestamp, previous_hash, body);

        self.records.push(record);
        let issues = validate_records(&self.records);
        if !issues.is_empty() {
            self.records.pop();
            return Err(StorageError::Integrity(issues));
        }

        Ok(self.records[self.records.len() - 1].clone())
    }

    /// The latest record, if any.
    pub fn tip(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Height of the tip, or `None` before genesis exists.
    pub fn height(&self) -> Option<u64> {
        self.tip().map(|r| r.height)
    }

    /// Number of records, genesis included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` before genesis exists.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in chain order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// First record whose hash equals `hash`.
    pub fn find_by_hash(&self, hash: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.hash == hash)
    }

    /// The record at `height`.
    pub fn find_by_height(&self, height: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.height == height)
    }

    /// Run the validator over the whole chain.
    pub fn validate(&self) -> Vec<IntegrityIssue> {
        validate_records(&self.records)
    }

    #[cfg(test)]
    pub(crate) fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(n: u64) -> Chain {
        let mut chain = Chain::new();
        for i in 0..n {
            chain
                .append(hex::encode(format!("payload-{}", i)), 1_000 + i)
                .expect("append");
        }
        chain
    }

    #[test]
    fn empty_chain_has_no_height() {
        let chain = Chain::new();
        assert_eq!(chain.height(), None);
        assert!(chain.is_empty());
        assert!(chain.tip().is_none());
    }

    #[test]
    fn first_append_is_genesis() {
        let chain = chain_of(1);
        let genesis = chain.tip().unwrap();
        assert_eq!(genesis.height, 0);
        assert!(genesis.previous_hash.is_none());
        assert_eq!(chain.height(), Some(0));
    }

    #[test]
    fn appends_link_to_predecessor() {
        let chain = chain_of(4);
        let records = chain.records();
        for i in 1..records.len() {
            assert_eq!(records[i].height, records[i - 1].height + 1);
            assert_eq!(records[i].previous_hash.as_deref(), Some(records[i - 1].hash.as_str()));
        }
        assert_eq!(chain.height(), Some(3));
        assert_eq!(chain.len(), 4);
    }

    #[test]
    fn append_path_always_validates() {
        assert!(chain_of(10).validate().is_empty());
    }

    #[test]
    fn append_returns_the_committed_record() {
        let mut chain = chain_of(2);
        let record = chain.append(hex::encode("next"), 5_000).unwrap();
        assert_eq!(chain.tip(), Some(&record));
        assert_eq!(record.timestamp, 5_000);
        assert!(record.hash_matches());
    }

    #[test]
    fn lookups_by_hash_and_height() {
        let chain = chain_of(3);
        let second = chain.records()[1].clone();
        assert_eq!(chain.find_by_hash(&second.hash), Some(&second));
        assert_eq!(chain.find_by_height(1), Some(&second));
        assert!(chain.find_by_hash("deadbeef").is_none());
        assert!(chain.find_by_height(3).is_none());
    }

    #[test]
    fn corrupted_chain_refuses_to_grow() {
        let mut chain = chain_of(3);
        chain.records_mut()[1].body = hex::encode("forged");

        let err = chain.append(hex::encode("after"), 9_000).unwrap_err();
        match err {
            StorageError::Integrity(issues) => {
                assert!(issues.iter().any(|i| i.height() == 1));
            }
            other => panic!("expected integrity error, got {other:?}"),
        }
        // The candidate was discarded.
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.height(), Some(2));
    }
}
