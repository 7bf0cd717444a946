//! Timestamp type used throughout the engine.
//!
//! Timestamps are Unix epoch seconds (UTC). Deadlines are checked lazily at
//! the next write attempt; nothing in the engine runs on a wall-clock timer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds in one hour.
pub const SECS_PER_HOUR: u64 = 3600;
/// Seconds in one day.
pub const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether this timestamp + duration has passed relative to `now`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 >= self.0.saturating_add(duration_secs)
    }

    /// This timestamp shifted forward by a number of seconds.
    pub fn plus(&self, secs: u64) -> Timestamp {
        Self(self.0.saturating_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_saturates_at_zero() {
        let later = Timestamp::new(100);
        assert_eq!(later.elapsed_since(Timestamp::new(50)), 0);
        assert_eq!(Timestamp::new(50).elapsed_since(later), 50);
    }

    #[test]
    fn expiry_is_inclusive() {
        let t = Timestamp::new(1000);
        assert!(!t.has_expired(10, Timestamp::new(1009)));
        assert!(t.has_expired(10, Timestamp::new(1010)));
    }

    #[test]
    fn plus_shifts_forward() {
        assert_eq!(Timestamp::new(10).plus(SECS_PER_DAY).as_secs(), 10 + SECS_PER_DAY);
    }
}
