use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::time::Duration;

/// June 12, 2020 at local midnight.
pub fn start_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 6, 12)
        .expect("2020-06-12 is a valid calendar date")
        .and_time(NaiveTime::MIN)
}

pub const START_CAPTION: &str = "Since June 12, 2020";

/// Timer periods and particle lifetimes of the live view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub tick: Duration,
    pub heart_every: Duration,
    pub heart_ttl: Duration,
    pub sparkle_every: Duration,
    pub sparkle_ttl: Duration,
    pub frame: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            heart_every: Duration::from_millis(800),
            heart_ttl: Duration::from_secs(6),
            sparkle_every: Duration::from_millis(1600),
            sparkle_ttl: Duration::from_secs(2),
            frame: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    pub start: NaiveDateTime,
    pub cadence: Cadence,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            start: start_instant(),
            cadence: Cadence::default(),
        }
    }
}
