//! Calendar arithmetic for trip scheduling.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::defaults::MAX_CONSECUTIVE_SKIPPED_DAYS;

/// Result of advancing to the next day a technician works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDayAdvance {
    /// The next working date
    pub date: NaiveDate,
    /// Non-working dates passed over on the way, in order
    pub skipped: Vec<NaiveDate>,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Move one calendar day forward, then keep moving while the date is a
/// weekend (unless `work_weekends`). The skip loop is bounded by
/// `MAX_CONSECUTIVE_SKIPPED_DAYS`.
///
/// Returns `None` when the walk would pass the last representable date.
pub fn next_work_day(date: NaiveDate, work_weekends: bool) -> Option<WorkDayAdvance> {
    let mut next = date.succ_opt()?;
    let mut skipped = Vec::new();

    if !work_weekends {
        while is_weekend(next) && (skipped.len() as u32) < MAX_CONSECUTIVE_SKIPPED_DAYS {
            skipped.push(next);
            next = next.succ_opt()?;
        }
    }

    Some(WorkDayAdvance { date: next, skipped })
}

/// Inclusive number of calendar days from `start` to `end` (0 if `end < start`).
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        0
    } else {
        (end - start).num_days() + 1
    }
}
