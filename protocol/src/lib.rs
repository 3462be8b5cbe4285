// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Starledger Protocol: Core Library
//!
//! An in-memory, hash-linked ledger of "star claims". A wallet holder asks
//! for a challenge message, signs it off-chain, and submits the signature
//! together with the star they want to register. If the challenge is fresh
//! and the signature checks out, the claim is appended to the chain.
//!
//! ## Architecture
//!
//! - **storage**: Records, the hash-linked chain, and the chain validator.
//! - **registry**: Ownership verification workflow and the query surface.
//! - **crypto**: SHA-256 hashing and Ed25519 wallet signatures.
//! - **clock**: The single source of "now" for timestamps and staleness.
//! - **config**: Protocol constants and registry parameters.
//!
//! ## Data Flow
//!
//! ```text
//! client ─► StarRegistry::submit_star ─► Ledger::append ─► validate ─► commit
//!                                                  ▲
//! client ─► StarRegistry::{get_by_hash, get_by_height, stars_by_address}
//! ```
//!
//! The chain lives in memory only. Restarting a node starts a fresh chain
//! from a new genesis record.

pub mod clock;
pub mod config;
pub mod crypto;
pub mod registry;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RegistryConfig;
pub use registry::{OwnedStar, RegistryError, Star, StarClaim, StarRegistry};
pub use storage::{IntegrityIssue, Ledger, Record};
