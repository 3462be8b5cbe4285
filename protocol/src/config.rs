//! # Protocol Configuration & Constants
//!
//! Every magic number in the registry lives here. The verification window
//! and the challenge tag are also carried in [`RegistryConfig`] so a
//! deployment can override them without touching the constants.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Library protocol version, reported by the node's `/status` endpoint.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Ownership Verification
// ---------------------------------------------------------------------------

/// Maximum age of a challenge message at submission time.
pub const VERIFICATION_WINDOW: Duration = Duration::from_secs(300);

/// How far in the future a challenge timestamp may sit before it is
/// rejected. Absorbs small backward steps of the wall clock between issuance
/// and submission.
pub const MAX_CLOCK_SKEW: Duration = Duration::from_secs(5);

/// Trailing tag of every challenge message: `<address>:<timestamp>:starRegistry`.
pub const REGISTRY_TAG: &str = "starRegistry";

/// Separator between the fields of a challenge message.
pub const MESSAGE_SEPARATOR: char = ':';

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Text stored in the genesis record's payload.
pub const GENESIS_MARKER: &str = "Genesis Block";

/// SHA-256 digest length in bytes. Record hashes are the hex form (64 chars).
pub const HASH_OUTPUT_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Node Defaults
// ---------------------------------------------------------------------------

/// Default REST API port.
pub const DEFAULT_API_PORT: u16 = 8000;

/// Default metrics (Prometheus) port.
pub const DEFAULT_METRICS_PORT: u16 = 8001;

// ---------------------------------------------------------------------------
// RegistryConfig
// ---------------------------------------------------------------------------

/// Tunable parameters of the ownership verification workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// How long a challenge message stays valid after it was issued.
    pub verification_window: Duration,

    /// Tolerated lead of a challenge timestamp over the current time.
    pub max_clock_skew: Duration,

    /// Tag appended to every challenge message and required on submission.
    pub registry_tag: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            verification_window: VERIFICATION_WINDOW,
            max_clock_skew: MAX_CLOCK_SKEW,
            registry_tag: REGISTRY_TAG.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Overrides the verification window, in whole seconds.
    pub fn with_window_secs(mut self, secs: u64) -> Self {
        self.verification_window = Duration::from_secs(secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_protocol_constants() {
        let config = RegistryConfig::default();
        assert_eq!(config.verification_window.as_secs(), 300);
        assert_eq!(config.max_clock_skew.as_secs(), 5);
        assert_eq!(config.registry_tag, "starRegistry");
    }

    #[test]
    fn window_override() {
        let config = RegistryConfig::default().with_window_secs(60);
        assert_eq!(config.verification_window, Duration::from_secs(60));
        assert_eq!(config.registry_tag, REGISTRY_TAG);
    }

    #[test]
    fn tag_does_not_contain_separator() {
        // A separator inside the tag would make challenge parsing ambiguous.
        assert!(!REGISTRY_TAG.contains(MESSAGE_SEPARATOR));
    }
}
