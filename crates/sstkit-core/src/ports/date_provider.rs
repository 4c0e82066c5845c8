//! Date provider port
//!
//! Timestamps appear in every payload, so the clock is a port: production
//! code uses [`SystemDateProvider`], tests inject [`FixedDateProvider`] to
//! make assembled requests reproducible down to the byte.

use chrono::{DateTime, Utc};

/// Clock abstraction used wherever the SDK stamps a time.
pub trait IDateProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDateProvider;

impl IDateProvider for SystemDateProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedDateProvider {
    instant: DateTime<Utc>,
}

impl FixedDateProvider {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Freeze the clock at the given epoch-millisecond instant.
    ///
    /// Out-of-range inputs clamp to the epoch rather than panicking.
    pub fn at_millis(millis: i64) -> Self {
        let instant = DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self { instant }
    }
}

impl IDateProvider for FixedDateProvider {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
