//! Error types for chain storage.

use thiserror::Error;

use super::codec::CodecError;
use super::validation::IntegrityIssue;

/// Errors that can occur while appending to or reading from the chain.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Committing the candidate record would leave the chain invalid.
    /// Carries every issue the validator found.
    #[error("chain integrity check failed with {} issue(s): {}", .0.len(), format_issues(.0))]
    Integrity(Vec<IntegrityIssue>),

    /// A payload could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

fn format_issues(issues: &[IntegrityIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
