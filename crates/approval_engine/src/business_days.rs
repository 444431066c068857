//! Calendar-day and business-day deltas.

use chrono::{Datelike, NaiveDateTime, TimeDelta, Weekday};

/// Whole days from `start` to `end`, floored toward negative infinity.
///
/// `2024-01-01 15:00 -> 2024-01-02 09:00` is 0 days; the reverse is -1.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let delta = end - start;
    // num_days truncates toward zero
    let days = delta.num_days();
    if delta < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}

/// Count weekday instants in `start, start + 1d, ...` that are `<= end`.
///
/// Returns 0 when `end < start`. The walk is linear in the number of days,
/// which is fine for approval windows of days to weeks.
pub fn count_business_days(start: NaiveDateTime, end: NaiveDateTime) -> u32 {
    let mut business_days = 0;
    let mut current = start;
    while current <= end {
        if is_weekday(current.weekday()) {
            business_days += 1;
        }
        current += TimeDelta::days(1);
    }
    business_days
}

fn is_weekday(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}
