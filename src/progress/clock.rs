//! Wall-clock access for date comparisons

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Source of "now". Calendar days are taken in the clock's local time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }
}

/// The host clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock pinned to one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// Noon local time on the given day (exists in every zone, DST included)
    pub fn local_noon(year: i32, month: u32, day: u32) -> Option<Self> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .map(Self)
    }

    pub fn advance_days(&mut self, days: i64) {
        self.0 += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
