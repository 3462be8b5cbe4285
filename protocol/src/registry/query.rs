//! Read-only lookups over the registry's chain.
//!
//! A hash miss is an error ([`RegistryError::NotFound`]); a height miss is
//! `None`.

use serde_json::Value;

use super::error::RegistryError;
use super::types::{OwnedStar, StarClaim};
use super::StarRegistry;
use crate::storage::{decode_payload, IntegrityIssue, Record};

impl StarRegistry {
    /// The record whose hash equals `hash`.
    pub fn get_by_hash(&self, hash: &str) -> Result<Record, RegistryError> {
        self.ledger()
            .get_by_hash(hash)
            .ok_or_else(|| RegistryError::NotFound(hash.to_string()))
    }

    /// The record at `height`, or `None` past the tip.
    pub fn get_by_height(&self, height: u64) -> Option<Record> {
        self.ledger().get_by_height(height)
    }

    /// Height of the latest record; `None` before genesis exists.
    pub fn height(&self) -> Option<u64> {
        self.ledger().height()
    }

    /// Every star registered by `address`, in chain order.
    ///
    /// Payloads are decoded one by one under a single read lock. Records
    /// whose payload has no `address` field (genesis) are skipped; any other
    /// decode failure fails the whole query.
    pub fn stars_by_address(&self, address: &str) -> Result<Vec<OwnedStar>, RegistryError> {
        self.ledger().with_records(|records| -> Result<Vec<OwnedStar>, RegistryError> {
            let mut stars = Vec::new();
            for record in records {
                let mut value: Value = decode_payload(&record.body)?;
                let matches = value
                    .get("address")
                    .and_then(Value::as_str)
                    .is_some_and(|a| a == address);
                if !matches {
                    continue;
                }
                let claim: StarClaim = serde_json::from_value(value.take())
                    .map_err(|e| RegistryError::Decode(e.into()))?;
                stars.push(OwnedStar {
                    owner: claim.address,
                    star: claim.star,
                });
            }
            Ok(stars)
        })
    }

    /// Validate the whole chain. Empty means valid.
    pub fn validate_chain(&self) -> Vec<IntegrityIssue> {
        self.ledger().validate_chain()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::config::RegistryConfig;
    use crate::crypto::{sign_message, Ed25519Verifier, WalletKeypair};
    use crate::registry::Star;

    fn setup() -> StarRegistry {
        StarRegistry::new(
            RegistryConfig::default(),
            Arc::new(ManualClock::new(1_700_000_000)),
            Arc::new(Ed25519Verifier),
        )
    }

    fn star(story: &str) -> Star {
        Star {
            dec: "-26° 29' 24.9".into(),
            ra: "16h 29m 1.0s".into(),
            story: story.into(),
        }
    }

    fn register(registry: &StarRegistry, kp: &WalletKeypair, story: &str) -> Record {
        let address = kp.address();
        let message = registry.request_verification_message(&address);
        let signature = sign_message(kp, &message);
        registry
            .submit_star(&address, &message, &signature, star(story))
            .expect("submission")
    }

    #[test]
    fn get_by_hash_finds_the_record() {
        let registry = setup();
        let kp = WalletKeypair::generate();
        let record = register(&registry, &kp, "antares");

        assert_eq!(registry.get_by_hash(&record.hash).unwrap(), record);
    }

    #[test]
    fn get_by_hash_miss_is_not_found() {
        let registry = setup();
        let err = registry.get_by_hash(&"0".repeat(64)).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn get_by_height_miss_is_none() {
        let registry = setup();
        assert!(registry.get_by_height(0).is_some());
        assert!(registry.get_by_height(1).is_none());
        assert!(registry.get_by_height(u64::MAX).is_none());
    }

    #[test]
    fn stars_by_address_returns_only_matching_claims() {
        let registry = setup();
        let alice = WalletKeypair::generate();
        let bob = WalletKeypair::generate();

        register(&registry, &alice, "first");
        register(&registry, &bob, "bob's");
        register(&registry, &alice, "second");

        let stars = registry.stars_by_address(&alice.address()).unwrap();
        assert_eq!(
            stars,
            vec![
                OwnedStar {
                    owner: alice.address(),
                    star: star("first")
                },
                OwnedStar {
                    owner: alice.address(),
                    star: star("second")
                },
            ]
        );
    }

    #[test]
    fn stars_by_address_skips_genesis_and_handles_no_match() {
        let registry = setup();
        assert!(registry.stars_by_address("nobody").unwrap().is_empty());
    }

    #[test]
    fn undecodable_payload_fails_the_query() {
        let registry = setup();
        registry
            .ledger()
            .tamper(|records| records[0].body = "zz".to_string());

        let err = registry.stars_by_address("anyone").unwrap_err();
        assert!(matches!(err, RegistryError::Decode(_)));
    }

    #[test]
    fn matching_address_with_bad_shape_fails_the_query() {
        let registry = setup();
        registry.ledger().tamper(|records| {
            records[0].body = hex::encode(r#"{"address":"addr1"}"#);
        });

        let err = registry.stars_by_address("addr1").unwrap_err();
        assert!(matches!(err, RegistryError::Decode(_)));
    }

    #[test]
    fn fresh_registry_validates() {
        assert!(setup().validate_chain().is_empty());
    }
}
