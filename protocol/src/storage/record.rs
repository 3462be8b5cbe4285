//! # Record Structure
//!
//! A record is the unit the chain is made of. Once a record has been
//! appended its fields never change; the ledger only hands out clones.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Record                                      │
//! │  ├── height: u64          (genesis = 0)      │
//! │  ├── timestamp: u64       (unix seconds)     │
//! │  ├── previous_hash: Option<String>           │
//! │  ├── hash: String         (SHA-256 hex)      │
//! │  └── body: String         (hex(JSON))        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Hash Computation
//!
//! The hash covers `height || timestamp || predecessor marker || previous_hash
//! || body`. The predecessor marker is a single byte (`0` for none, `1` for
//! present) so a genesis record can never collide with one whose predecessor
//! hash is empty. The stored `hash` field is not part of its own preimage.

use serde::{Deserialize, Serialize};

use super::codec::{decode_payload, encode_payload, CodecError};
use crate::config::GENESIS_MARKER;
use crate::crypto::hash::sha256_hex_multi;

/// The payload of the genesis record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisPayload {
    pub data: String,
}

impl Default for GenesisPayload {
    fn default() -> Self {
        Self {
            data: GENESIS_MARKER.to_string(),
        }
    }
}

/// One link in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Zero-based position in the chain.
    pub height: u64,
    /// Unix time in seconds at which the record was appended.
    pub timestamp: u64,
    /// Hash of the record directly before this one. `None` only for genesis.
    pub previous_hash: Option<String>,
    /// SHA-256 hex digest of this record's content.
    pub hash: String,
    /// Opaque encoded payload.
    pub body: String,
}

impl Record {
    /// Build a record and seal it with its hash.
    ///
    /// The hash is computed exactly once, after every other field is set.
    pub fn seal(height: u64, timestamp: u64, previous_hash: Option<String>, body: String) -> Self {
        let hash = compute_record_hash(height, timestamp, previous_hash.as_deref(), &body);
        Self {
            height,
            timestamp,
            previous_hash,
            hash,
            body,
        }
    }

    /// Recompute the digest from the record's content, ignoring the stored hash.
    pub fn compute_hash(&self) -> String {
        compute_record_hash(
            self.height,
            self.timestamp,
            self.previous_hash.as_deref(),
            &self.body,
        )
    }

    /// `true` if the stored hash matches the content.
    pub fn hash_matches(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// `true` for the record at height 0.
    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }

    /// Decode the payload into `T`.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Result<T, CodecError> {
        decode_payload(&self.body)
    }

    /// Encoded payload for the genesis record.
    pub fn genesis_body() -> Result<String, CodecError> {
        encode_payload(&GenesisPayload::default())
    }
}

fn compute_record_hash(
    height: u64,
    timestamp: u64,
    previous_hash: Option<&str>,
    body: &str,
) -> String {
    let marker = u8::from(previous_hash.is_some());
    let previous = previous_hash.unwrap_or_default();
    sha256_hex_multi(&[
        &height.to_le_bytes(),
        &timestamp.to_le_bytes(),
        &[marker],
        previous.as_bytes(),
        body.as_bytes(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genesis() -> Record {
        Record::seal(0, 1_700_000_000, None, Record::genesis_body().unwrap())
    }

    #[test]
    fn sealed_record_hash_matches() {
        let r = genesis();
        assert!(r.hash_matches());
        assert_eq!(r.hash.len(), 64);
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(genesis().hash, genesis().hash);
    }

    #[test]
    fn hash_excludes_stored_hash_field() {
        let mut r = genesis();
        let expected = r.compute_hash();
        r.hash = "00".repeat(32);
        assert_eq!(r.compute_hash(), expected);
        assert!(!r.hash_matches());
    }

    #[test]
    fn every_content_field_feeds_the_hash() {
        let base = Record::seal(3, 100, Some("ab".repeat(32)), "00".into());
        let variants = [
            Record::seal(4, 100, Some("ab".repeat(32)), "00".into()),
            Record::seal(3, 101, Some("ab".repeat(32)), "00".into()),
            Record::seal(3, 100, Some("cd".repeat(32)), "00".into()),
            Record::seal(3, 100, Some("ab".repeat(32)), "01".into()),
        ];
        for v in variants {
            assert_ne!(v.hash, base.hash);
        }
    }

    #[test]
    fn absent_and_empty_predecessor_differ() {
        let none = Record::seal(0, 1, None, "00".into());
        let empty = Record::seal(0, 1, Some(String::new()), "00".into());
        assert_ne!(none.hash, empty.hash);
    }

    #[test]
    fn genesis_body_decodes_to_marker() {
        let payload: GenesisPayload = genesis().decode_body().unwrap();
        assert_eq!(payload.data, "Genesis Block");
    }

    #[test]
    fn record_json_roundtrip() {
        let r = genesis();
        let json = serde_json::to_string(&r).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
