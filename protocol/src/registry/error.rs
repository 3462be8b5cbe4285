//! Error types for the star registry.
//!
//! Every registry operation that can fail returns a [`RegistryError`].
//! Submission failures (`MalformedMessage`, `ExpiredRequest`,
//! `InvalidSignature`) are raised before the ledger is touched, so a
//! rejected submission never leaves partial state behind.

use thiserror::Error;

use crate::storage::{CodecError, IntegrityIssue, StorageError};

/// Errors that can occur in the ownership workflow and query surface.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The challenge message does not have the `<address>:<time>:<tag>`
    /// shape, or does not belong to the submitting address.
    #[error("malformed verification message: {0}")]
    MalformedMessage(String),

    /// The challenge message is older than the verification window.
    #[error("verification request expired: issued {elapsed_secs}s ago (window: {window_secs}s)")]
    ExpiredRequest {
        /// Seconds between issuance and submission.
        elapsed_secs: u64,
        /// Configured window in seconds.
        window_secs: u64,
    },

    /// The signature does not verify for this address and message.
    #[error("invalid signature for address {address}")]
    InvalidSignature {
        /// The address the submission claimed.
        address: String,
    },

    /// No record has the requested hash.
    #[error("no record with hash {0}")]
    NotFound(String),

    /// A record payload could not be decoded.
    #[error("payload decode error: {0}")]
    Decode(#[from] CodecError),

    /// The chain failed validation; the submission was not committed.
    #[error("chain integrity check failed with {} issue(s)", .0.len())]
    Integrity(Vec<IntegrityIssue>),
}

impl RegistryError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::MalformedMessage(_) => "malformed_message",
            RegistryError::ExpiredRequest { .. } => "expired_request",
            RegistryError::InvalidSignature { .. } => "invalid_signature",
            RegistryError::NotFound(_) => "not_found",
            RegistryError::Decode(_) => "decode_error",
            RegistryError::Integrity(_) => "integrity_error",
        }
    }
}

impl From<StorageError> for RegistryError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Integrity(issues) => RegistryError::Integrity(issues),
            StorageError::Codec(c) => RegistryError::Decode(c),
        }
    }
}
