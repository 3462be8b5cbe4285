//! Payload types carried by star claim records.

use serde::{Deserialize, Serialize};

/// A star as the claimant describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    /// Declination, e.g. `"68° 52' 56.9"`.
    pub dec: String,
    /// Right ascension, e.g. `"16h 29m 1.0s"`.
    pub ra: String,
    /// Free-text story attached to the claim.
    pub story: String,
}

/// The payload of every submitted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarClaim {
    /// Wallet address that proved ownership.
    pub address: String,
    /// The challenge message that was signed.
    pub message: String,
    /// Hex signature over `message`.
    pub signature: String,
    /// The claimed star.
    pub star: Star,
}

/// A star together with the address that registered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedStar {
    pub owner: String,
    pub star: Star,
}
