use crate::clock::Clock;
use crate::elapsed::{Calculator, ElapsedBreakdown};
use crate::occasion::{Occasion, match_occasion};
use chrono::NaiveDateTime;
use serde::Serialize;

pub const TITLE: &str = "Our Love Story";
pub const LOVE_NOTE: &str = "Every moment with you is a blessing.";
pub const LOVE_SIGNOFF: &str = "I love you more with each passing second 💖";

/// Everything a presenter shows for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub at: NaiveDateTime,
    pub started: bool,
    pub elapsed: ElapsedBreakdown,
    pub occasion: Option<Occasion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnit {
    pub value: i64,
    pub label: &'static str,
}

impl Snapshot {
    pub fn at(calculator: &Calculator, now: NaiveDateTime) -> Self {
        Self {
            at: now,
            started: calculator.has_started(now),
            elapsed: calculator.elapsed(now),
            occasion: match_occasion(&now),
        }
    }

    pub fn take(calculator: &Calculator, clock: &dyn Clock) -> Self {
        Self::at(calculator, clock.now())
    }

    /// Counter cells in display order: calendar units, clock, then totals.
    pub fn time_units(&self) -> [TimeUnit; 9] {
        let e = &self.elapsed;
        [
            TimeUnit::new(e.years.into(), "Years"),
            TimeUnit::new(e.months.into(), "Months"),
            TimeUnit::new(e.days.into(), "Days"),
            TimeUnit::new(e.hours.into(), "Hours"),
            TimeUnit::new(e.minutes.into(), "Minutes"),
            TimeUnit::new(e.seconds.into(), "Seconds"),
            TimeUnit::new(e.total_months, "Total Months"),
            TimeUnit::new(e.total_days, "Total Days"),
            TimeUnit::new(e.total_hours, "Total Hours"),
        ]
    }
}

impl TimeUnit {
    fn new(value: i64, label: &'static str) -> Self {
        Self { value, label }
    }
}
