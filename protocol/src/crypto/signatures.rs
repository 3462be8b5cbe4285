//! # Signature Verification
//!
//! The ownership workflow only needs a yes/no answer to "did `address`
//! sign `message`?". [`SignatureVerifier`] is that seam; the scheme behind
//! it belongs to the deployment. [`Ed25519Verifier`] is the default.

use super::keys::{WalletKeypair, WalletPublicKey, WalletSignature};

/// Checks an address-keyed message signature.
///
/// Implementations must not panic on malformed input; anything that
/// cannot be parsed simply fails verification.
pub trait SignatureVerifier: Send + Sync {
    /// Returns `true` iff `signature` is a valid signature of `message`
    /// by the key behind `address`.
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool;
}

/// Ed25519 over the UTF-8 message bytes, with hex addresses and signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        let Ok(public_key) = WalletPublicKey::from_hex(address) else {
            return false;
        };
        let Ok(signature) = WalletSignature::from_hex(signature) else {
            return false;
        };
        public_key.verify(message.as_bytes(), &signature)
    }
}

/// Sign a challenge message, returning the hex signature a submission carries.
///
/// # Example
///
/// ```
/// use starledger_protocol::crypto::{sign_message, Ed25519Verifier, SignatureVerifier, WalletKeypair};
///
/// let kp = WalletKeypair::generate();
/// let sig = sign_message(&kp, "hello");
/// assert!(Ed25519Verifier.verify("hello", &kp.address(), &sig));
/// ```
pub fn sign_message(keypair: &WalletKeypair, message: &str) -> String {
    keypair.sign(message.as_bytes()).to_hex()
}
