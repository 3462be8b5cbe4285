//! # Time Source
//!
//! Every timestamp in the registry comes from a [`Clock`]: record
//! timestamps, the time embedded in challenge messages, and the "now" the
//! staleness check compares against. Production code uses [`SystemClock`];
//! tests drive a [`ManualClock`] so the five-minute window can be crossed
//! without sleeping.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Source of the current Unix time in whole seconds.
pub trait Clock: Send + Sync {
    /// Returns the current Unix timestamp in seconds.
    fn now_secs(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        // Pre-1970 clocks clamp to zero rather than wrapping.
        Utc::now().timestamp().max(0) as u64
    }
}

/// A clock that only moves when told to.
///
/// Shared freely across threads; reads and writes are atomic.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a clock frozen at `start` seconds.
    pub fn new(start: u64) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Jumps to an absolute time.
    pub fn set(&self, secs: u64) {
        self.now.store(secs, Ordering::SeqCst);
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_secs() > 1_577_836_800);
    }

    #[test]
    fn manual_clock_set_and_advance() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now_secs(), 1_000);

        clock.advance(10);
        assert_eq!(clock.now_secs(), 1_010);

        clock.set(5);
        assert_eq!(clock.now_secs(), 5);
    }
}
