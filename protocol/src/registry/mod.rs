//! # Star Registry
//!
//! The ownership verification workflow and the query surface, on top of
//! the [`Ledger`].
//!
//! ## Submission Flow
//!
//! ```text
//!   ┌────────┐                                    ┌──────────┐
//!   │ Wallet │                                    │ Registry │
//!   └───┬────┘                                    └────┬─────┘
//!       │  1. request_verification_message(address)    │
//!       ├─────────────────────────────────────────────►│
//!       │     "<address>:<now>:starRegistry"           │
//!       │◄─────────────────────────────────────────────┤
//!       │                                              │
//!       │  2. sign message off-chain                   │
//!       │                                              │
//!       │  3. submit_star(address, msg, sig, star)     │
//!       ├─────────────────────────────────────────────►│
//!       │        parse ─► staleness ─► signature       │
//!       │                    ─► Ledger::append         │
//!       │     Record                                   │
//!       │◄─────────────────────────────────────────────┤
//! ```
//!
//! The staleness check runs before the signature check, so an expired but
//! validly signed request is reported as expired. Signature verification
//! happens before the ledger's write lock is taken.

pub mod challenge;
pub mod query;
pub mod types;

mod error;

use std::sync::Arc;

pub use error::RegistryError;
pub use types::{OwnedStar, Star, StarClaim};

use crate::clock::Clock;
use crate::config::RegistryConfig;
use crate::crypto::signatures::SignatureVerifier;
use crate::storage::{Ledger, Record};

/// The star registry service.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct StarRegistry {
    ledger: Ledger,
    verifier: Arc<dyn SignatureVerifier>,
    clock: Arc<dyn Clock>,
    config: RegistryConfig,
}

impl StarRegistry {
    /// Create a registry with a fresh ledger seeded with genesis.
    pub fn new(
        config: RegistryConfig,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Self {
        let ledger = Ledger::new(Arc::clone(&clock));
        Self::with_ledger(ledger, config, clock, verifier)
    }

    /// Create a registry over an existing ledger.
    pub fn with_ledger(
        ledger: Ledger,
        config: RegistryConfig,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Self {
        Self {
            ledger,
            verifier,
            clock,
            config,
        }
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Registry parameters.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Build the challenge message `address` must sign.
    ///
    /// Stateless: nothing is remembered about issued challenges.
    pub fn request_verification_message(&self, address: &str) -> String {
        challenge::build_message(address, self.clock.now_secs(), &self.config.registry_tag)
    }

    /// Verify ownership of `address` and register `star`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::MalformedMessage`] if the message is not a
    ///   challenge issued for `address` by this registry.
    /// - [`RegistryError::ExpiredRequest`] if the challenge is older than the
    ///   verification window.
    /// - [`RegistryError::InvalidSignature`] if `signature` does not verify.
    /// - [`RegistryError::Integrity`] if the chain refused the append.
    pub fn submit_star(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: Star,
    ) -> Result<Record, RegistryError> {
        let result = self.check_submission(address, message, signature);
        if let Err(e) = &result {
            tracing::warn!(address, reason = e.kind(), "star submission rejected");
        }
        result?;

        let claim = StarClaim {
            address: address.to_string(),
            message: message.to_string(),
            signature: signature.to_string(),
            star,
        };
        let record = self.ledger.append(&claim)?;
        tracing::info!(address, height = record.height, "star registered");
        Ok(record)
    }

    /// Message shape, then staleness, then signature.
    fn check_submission(
        &self,
        address: &str,
        message: &str,
        signature: &str,
    ) -> Result<(), RegistryError> {
        let challenge = challenge::parse_message(message)?;
        if challenge.address != address {
            return Err(RegistryError::MalformedMessage(
                "message was issued for a different address".to_string(),
            ));
        }
        if challenge.tag != self.config.registry_tag {
            return Err(RegistryError::MalformedMessage(format!(
                "unexpected tag {:?}",
                challenge.tag
            )));
        }

        let now = self.clock.now_secs();
        let skew_secs = self.config.max_clock_skew.as_secs();
        if challenge.issued_at > now.saturating_add(skew_secs) {
            return Err(RegistryError::MalformedMessage(
                "message timestamp is in the future".to_string(),
            ));
        }
        let elapsed_secs = now.saturating_sub(challenge.issued_at);
        let window_secs = self.config.verification_window.as_secs();
        if elapsed_secs > window_secs {
            return Err(RegistryError::ExpiredRequest {
                elapsed_secs,
                window_secs,
            });
        }

        if !self.verifier.verify(message, address, signature) {
            return Err(RegistryError::InvalidSignature {
                address: address.to_string(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for StarRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarRegistry")
            .field("ledger", &self.ledger)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
