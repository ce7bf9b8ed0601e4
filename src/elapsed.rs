//! elapsed.rs
//!
//! Calendar-aware elapsed time since the start instant, shaped for the
//! counter grid:
//!     years / months / days since the start date
//!     hours / minutes / seconds of the *current* clock reading
//!     running totals in months, days and hours
//!
//! Chrono does not provide a built-in year/month/day diff, so the borrowing
//! rules are implemented manually:
//!   • day underflow borrows the length of the month before `now`
//!   • month underflow borrows from years
//!   • leap years and varying month lengths come from `days_in_month`

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

const MILLIS_PER_HOUR: i64 = 1000 * 60 * 60;
const MILLIS_PER_DAY: i64 = MILLIS_PER_HOUR * 24;

/// One evaluation of the counter. Recomputed on every tick, never mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElapsedBreakdown {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub total_months: i64,
    pub total_days: i64,
    pub total_hours: i64,
}

/// Holds the injected start instant so callers only supply `now`.
#[derive(Debug, Clone, Copy)]
pub struct Calculator {
    start: NaiveDateTime,
}

impl Calculator {
    pub fn new(start: NaiveDateTime) -> Self {
        Self { start }
    }

    pub fn elapsed(&self, now: NaiveDateTime) -> ElapsedBreakdown {
        compute(self.start, now)
    }

    /// `false` while the host clock is still before the start instant.
    pub fn has_started(&self, now: NaiveDateTime) -> bool {
        now >= self.start
    }
}

/// Computes the breakdown between `start` and `now`.
///
/// `hours`, `minutes` and `seconds` are `now`'s time of day, not the
/// remainder since the last day boundary. When `now` precedes `start`,
/// every elapsed field is zero and only the clock reading is filled in.
pub fn compute(start: NaiveDateTime, now: NaiveDateTime) -> ElapsedBreakdown {
    let clock = ElapsedBreakdown {
        hours: now.hour(),
        minutes: now.minute(),
        seconds: now.second(),
        ..ElapsedBreakdown::default()
    };

    if now < start {
        return clock;
    }

    let mut years = now.year() - start.year();
    let mut months = now.month() as i32 - start.month() as i32;
    let mut days = now.day() as i32 - start.day() as i32;

    // Fix day underflow
    if days < 0 {
        months -= 1;

        let (prev_year, prev_month) = previous_month(now.year(), now.month());
        let borrowed = days_in_month(prev_year, prev_month) as i32;

        // A start day past the end of the borrowed month counts from its last day
        let start_day = (start.day() as i32).min(borrowed);
        days = borrowed - start_day + now.day() as i32;
    }

    // Fix month underflow
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let diff = (now - start).num_milliseconds();

    ElapsedBreakdown {
        years,
        months,
        days,
        total_months: i64::from(years) * 12 + i64::from(months),
        total_days: diff.div_euclid(MILLIS_PER_DAY),
        total_hours: diff.div_euclid(MILLIS_PER_HOUR),
        ..clock
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Returns number of days in a given year/month (handles leap years)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30, // unreachable for chrono months, keeps the function total
    }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
