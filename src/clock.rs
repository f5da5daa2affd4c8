//! Timestamp source
//!
//! Timestamps are cut to millisecond precision so the textual form in
//! storage reproduces them exactly.

use chrono::{DateTime, SubsecRound, Utc};

/// Provides the current time to the store
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock (`Date.now()` in the browser via chrono's wasmbind)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

#[cfg(test)]
pub(crate) use manual::ManualClock;
