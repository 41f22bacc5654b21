//! Injected time source and reporting-timezone dates.
//!
//! Daily statistics are bucketed by the calendar day in UTC+8, regardless of
//! the device timezone.

use std::sync::RwLock;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Offset of the reporting timezone from UTC, in hours.
pub const REPORTING_UTC_OFFSET_HOURS: i64 = 8;

/// Calendar day of `now` in the reporting timezone.
pub fn reporting_date(now: DateTime<Utc>) -> NaiveDate {
    (now + Duration::hours(REPORTING_UTC_OFFSET_HOURS)).date_naive()
}

/// Source of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day in the reporting timezone.
    fn today(&self) -> NaiveDate {
        reporting_date(self.now())
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
        *guard = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}
