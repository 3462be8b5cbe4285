//! # Storage Module
//!
//! The in-memory hash-linked chain and everything needed to trust it.
//!
//! ## Architecture
//!
//! ```text
//! codec.rs      hex(JSON) payload encoding; opaque to the chain itself
//! record.rs     Record structure, hash preimage, genesis payload
//! chain.rs      Ordered record sequence: append, tip, lookups
//! validation.rs Full-sequence hash and linkage checker
//! ledger.rs     Thread-safe chain manager: single writer, shared readers
//! ```
//!
//! ## Invariants
//!
//! 1. `records[0].height == 0` and it has no predecessor hash.
//! 2. `records[i].height == records[i-1].height + 1`.
//! 3. `records[i].previous_hash == Some(records[i-1].hash)`.
//! 4. Every stored hash equals the recomputed digest of its record.
//!
//! Appends are validated before they are committed: a candidate record that
//! would leave the chain in a state violating any of the above is discarded
//! and the issues are returned to the caller.

pub mod chain;
pub mod codec;
pub mod ledger;
pub mod record;
pub mod validation;

mod error;

pub use chain::Chain;
pub use codec::{decode_payload, encode_payload, CodecError};
pub use error::StorageError;
pub use ledger::Ledger;
pub use record::{GenesisPayload, Record};
pub use validation::{validate_records, IntegrityIssue};
