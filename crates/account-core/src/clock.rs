//! Wall-clock access and date arithmetic
//!
//! Refresh token expirations are absolute timestamps computed from the
//! current time, so the clock is injectable for deterministic tests.

use chrono::{DateTime, Duration, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(any(test, feature = "test-utils"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Add whole calendar days to a timestamp
///
/// Returns `None` when the result falls outside the representable range.
pub fn add_days(ts: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    ts.checked_add_signed(Duration::try_days(days)?)
}
