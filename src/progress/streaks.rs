//! Daily streak tracking
//!
//! A streak counts consecutive local calendar days with at least one deed.
//! Expiry is lazy: nothing decays on a timer, the streak is re-evaluated
//! on the next deed or the next load.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// How the last deed's calendar day relates to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayGap {
    /// Last deed was today
    SameDay,
    /// Last deed was yesterday
    Consecutive,
    /// Older than yesterday, or in the future
    Lapsed,
}

impl DayGap {
    pub fn between(last: DateTime<Utc>, today: NaiveDate) -> Self {
        let last_day = last.with_timezone(&Local).date_naive();
        match (today - last_day).num_days() {
            0 => Self::SameDay,
            1 => Self::Consecutive,
            _ => Self::Lapsed,
        }
    }
}

/// Streak after logging a deed today
pub fn next_streak(current: u32, last_deed: Option<DateTime<Utc>>, today: NaiveDate) -> u32 {
    match last_deed.map(|last| DayGap::between(last, today)) {
        // Already counted today; a deed exists so the streak is at least 1
        Some(DayGap::SameDay) => current.max(1),
        Some(DayGap::Consecutive) => current.saturating_add(1),
        Some(DayGap::Lapsed) | None => 1,
    }
}

/// Whether a stored streak is still alive (last deed today or yesterday)
pub fn is_streak_alive(last_deed: Option<DateTime<Utc>>, today: NaiveDate) -> bool {
    matches!(
        last_deed.map(|last| DayGap::between(last, today)),
        Some(DayGap::SameDay | DayGap::Consecutive)
    )
}
