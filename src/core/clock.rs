//! Source of "now" and of the current local day.
//!
//! Everything that cares about day boundaries (daily task rollover, login
//! streaks) goes through a [`Clock`] so tests can pin the time.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Utc};
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    /// Current instant in the storefront's local offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current local calendar day.
    fn today(&self) -> NaiveDate {
        local_day(&self.now())
    }
}

/// Calendar day of `now` in its own offset (i.e. `now` normalized to local midnight).
pub fn local_day(now: &DateTime<FixedOffset>) -> NaiveDate {
    now.date_naive()
}

/// UTC timestamp used for `earned_at` fields.
pub fn utc_instant(now: &DateTime<FixedOffset>) -> DateTime<Utc> {
    now.with_timezone(&Utc)
}

/// Wall clock in the host's local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = *now + by;
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock()
    }
}
