//! Time sources.
//!
//! The evaluator never reads the system clock itself. Callers either pass an
//! explicit instant or hand over a [`Clock`]: [`SystemClock`] in production,
//! [`FixedClock`] in tests and for "what if" queries.

use chrono::{DateTime, Utc};

use crate::error::HoursError;

/// Supplies the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Stop the clock at an RFC 3339 instant (e.g. `"2026-02-18T12:00:00Z"`).
    pub fn parse(rfc3339: &str) -> Result<Self, HoursError> {
        parse_instant(rfc3339).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parse an RFC 3339 datetime string into `DateTime<Utc>`.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, HoursError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| HoursError::InvalidDatetime(format!("'{}': {}", s, e)))
}
