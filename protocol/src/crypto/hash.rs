//! # Hashing Utilities
//!
//! SHA-256 is the only digest the registry uses. Record hashes are stored
//! as 64-character lowercase hex strings so they can be passed around in
//! URLs and JSON without further encoding.

use sha2::{Digest, Sha256};

use crate::config::HASH_OUTPUT_LENGTH;

/// Compute the SHA-256 hash of the input data as a fixed-size array.
///
/// # Example
///
/// ```
/// use starledger_protocol::crypto::sha256;
///
/// let hash = sha256(b"starledger");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the SHA-256 hash and return it as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Hash multiple byte slices in order without concatenating them first.
///
/// Same digest as hashing the concatenation; the parts are fed to the
/// hasher one after another.
pub fn sha256_hex_multi(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}
