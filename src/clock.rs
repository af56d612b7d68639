//! Sources of the current time.
//!
//! The store and the relative time formatter never call
//! [OffsetDateTime::now_utc] directly, so tests can pin "now" to a known
//! instant with [FixedClock].

use time::OffsetDateTime;

/// Provides the current instant.
pub trait Clock {
    /// The current date and time.
    fn now(&self) -> OffsetDateTime;
}

/// Reads the system clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
