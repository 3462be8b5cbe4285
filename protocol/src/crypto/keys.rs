//! # Wallet Keys
//!
//! Ed25519 keypairs that stand in for wallet identities. The registry
//! never holds private keys; this module exists so clients (and tests) can
//! produce the address and signature a submission needs.
//!
//! An address is the lowercase hex encoding of the 32-byte public key.
//! Key bytes are never logged.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing key or signature material.
///
/// Deliberately vague about *why* the bytes were rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid secret key: expected 32 hex-encoded bytes")]
    InvalidSecretKey,

    #[error("invalid address: expected a hex-encoded Ed25519 public key")]
    InvalidAddress,

    #[error("invalid signature: expected 64 hex-encoded bytes")]
    InvalidSignature,
}

/// A wallet keypair.
///
/// Intentionally not `Serialize`; exporting the secret is an explicit
/// call to [`secret_key_hex`](Self::secret_key_hex).
///
/// # Examples
///
/// ```
/// use starledger_protocol::crypto::keys::WalletKeypair;
///
/// let kp = WalletKeypair::generate();
/// let sig = kp.sign(b"hello");
/// assert!(kp.public_key().verify(b"hello", &sig));
/// ```
pub struct WalletKeypair {
    signing_key: SigningKey,
}

/// The public half of a wallet; its hex form is the wallet address.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletPublicKey {
    key: VerifyingKey,
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletSignature {
    bytes: [u8; 64],
}

// ---------------------------------------------------------------------------
// WalletKeypair
// ---------------------------------------------------------------------------

impl WalletKeypair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic keypair from a 32-byte seed. Handy in tests.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct a keypair from a hex-encoded 32-byte secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// The public key.
    pub fn public_key(&self) -> WalletPublicKey {
        WalletPublicKey {
            key: self.signing_key.verifying_key(),
        }
    }

    /// The wallet address: hex-encoded public key.
    pub fn address(&self) -> String {
        self.public_key().to_hex()
    }

    /// Sign raw bytes.
    pub fn sign(&self, message: &[u8]) -> WalletSignature {
        WalletSignature {
            bytes: self.signing_key.sign(message).to_bytes(),
        }
    }

    /// Export the secret key as hex. Handle with care.
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }
}

impl Clone for WalletKeypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for WalletKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material.
        write!(f, "WalletKeypair(address={})", self.address())
    }
}

// ---------------------------------------------------------------------------
// WalletPublicKey
// ---------------------------------------------------------------------------

impl WalletPublicKey {
    /// Parse a wallet address.
    ///
    /// Rejects wrong lengths and byte strings that are not valid curve points.
    pub fn from_hex(address: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(address).map_err(|_| KeyError::InvalidAddress)?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidAddress)?;
        let key = VerifyingKey::from_bytes(&arr).map_err(|_| KeyError::InvalidAddress)?;
        Ok(Self { key })
    }

    /// Hex-encoded form, i.e. the address.
    pub fn to_hex(&self) -> String {
        hex::encode(self.key.to_bytes())
    }

    /// Strict Ed25519 verification. Returns `false` on any failure.
    pub fn verify(&self, message: &[u8], signature: &WalletSignature) -> bool {
        let sig = DalekSignature::from_bytes(&signature.bytes);
        self.key.verify_strict(message, &sig).is_ok()
    }
}

impl fmt::Display for WalletPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for WalletPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletPublicKey({}…)", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// WalletSignature
// ---------------------------------------------------------------------------

impl WalletSignature {
    /// Parse a hex-encoded 64-byte signature.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidSignature)?;
        let arr: [u8; 64] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSignature)?;
        Ok(Self { bytes: arr })
    }

    /// Hex-encoded form. 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }
}

impl fmt::Debug for WalletSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletSignature({}…)", &self.to_hex()[..16])
    }
}
