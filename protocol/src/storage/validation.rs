//! # Chain Validation
//!
//! Walks a record sequence and reports every hash or linkage problem it
//! finds. The validator is a pure checker: it never repairs or rejects
//! anything itself. The ledger decides what to do with the report.
//!
//! Linkage is checked by position. The sequence order already encodes
//! adjacency, so record `i` is compared against record `i - 1` directly and
//! the whole walk is O(n).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::Record;

/// A single integrity problem, always tied to the height of the record
/// that exhibits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityIssue {
    /// The stored hash does not match the record's content.
    HashMismatch {
        height: u64,
        stored: String,
        computed: String,
    },
    /// The first record is not at height 0.
    GenesisHeight { height: u64 },
    /// The genesis record claims a predecessor.
    GenesisHasPredecessor { height: u64 },
    /// Heights are not consecutive.
    HeightGap { height: u64, expected: u64 },
    /// The predecessor hash is missing or points somewhere other than the
    /// record directly before this one.
    BrokenLink {
        height: u64,
        expected: String,
        found: Option<String>,
    },
}

impl IntegrityIssue {
    /// Height of the record this issue was found on.
    pub fn height(&self) -> u64 {
        match self {
            IntegrityIssue::HashMismatch { height, .. }
            | IntegrityIssue::GenesisHeight { height }
            | IntegrityIssue::GenesisHasPredecessor { height }
            | IntegrityIssue::HeightGap { height, .. }
            | IntegrityIssue::BrokenLink { height, .. } => *height,
        }
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::HashMismatch {
                height,
                stored,
                computed,
            } => write!(
                f,
                "record {} hash mismatch: stored={}, computed={}",
                height, stored, computed
            ),
            IntegrityIssue::GenesisHeight { height } => {
                write!(f, "record {} is first in the chain but is not at height 0", height)
            }
            IntegrityIssue::GenesisHasPredecessor { height } => {
                write!(f, "record {} is genesis but has a predecessor hash", height)
            }
            IntegrityIssue::HeightGap { height, expected } => {
                write!(f, "record {} out of sequence: expected height {}", height, expected)
            }
            IntegrityIssue::BrokenLink {
                height,
                expected,
                found,
            } => write!(
                f,
                "record {} broken link: expected previous hash {}, found {}",
                height,
                expected,
                found.as_deref().unwrap_or("none")
            ),
        }
    }
}

/// Check every record in `records` and return all issues found.
///
/// An empty result means the sequence satisfies every chain invariant.
/// An empty sequence is trivially valid.
pub fn validate_records(records: &[Record]) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    for (i, record) in records.iter().enumerate() {
        // 1. Content hash.
        let computed = record.compute_hash();
        if computed != record.hash {
            issues.push(IntegrityIssue::HashMismatch {
                height: record.height,
                stored: record.hash.clone(),
                computed,
            });
        }

        // 2. Genesis has no predecessor to link to.
        if i == 0 {
            if record.height != 0 {
                issues.push(IntegrityIssue::GenesisHeight {
                    height: record.height,
                });
            }
            if record.previous_hash.is_some() {
                issues.push(IntegrityIssue::GenesisHasPredecessor {
                    height: record.height,
                });
            }
            continue;
        }

        // 3. Height and hash linkage against the record directly before.
        let previous = &records[i - 1];
        let expected_height = previous.height + 1;
        if record.height != expected_height {
            issues.push(IntegrityIssue::HeightGap {
                height: record.height,
                expected: expected_height,
            });
        }
        if record.previous_hash.as_deref() != Some(previous.hash.as_str()) {
            issues.push(IntegrityIssue::BrokenLink {
                height: record.height,
                expected: previous.hash.clone(),
                found: record.previous_hash.clone(),
            });
        }
    }

    issues
}
