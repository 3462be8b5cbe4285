//! # Cryptographic Collaborators
//!
//! The chain and the ownership workflow treat hashing and signature
//! checking as external primitives. This module supplies the concrete
//! ones a default deployment uses:
//!
//! - **SHA-256** for record hashes, rendered as lowercase hex.
//! - **Ed25519** for wallet signatures. An address is the hex-encoded
//!   32-byte public key; a signature is the hex-encoded 64-byte signature
//!   over the UTF-8 challenge message.
//!
//! Everything here is a thin wrapper around `sha2` and `ed25519-dalek`.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{sha256, sha256_hex, sha256_hex_multi};
pub use keys::{WalletKeypair, WalletPublicKey, WalletSignature};
pub use signatures::{sign_message, Ed25519Verifier, SignatureVerifier};
