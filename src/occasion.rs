use chrono::{Datelike, Weekday};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccasionKind {
    Valentines,
    Birthday,
    Anniversary,
    Monthsary,
    Weeksary,
}

/// A greeting chosen from the calendar. Lives for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occasion {
    pub kind: OccasionKind,
    pub symbol: &'static str,
    pub message: &'static str,
}

impl Occasion {
    const fn new(kind: OccasionKind, symbol: &'static str, message: &'static str) -> Self {
        Self {
            kind,
            symbol,
            message,
        }
    }

    /// The message wrapped in its symbol on both sides, as the banner shows it.
    pub fn banner(&self) -> String {
        format!("{} {} {}", self.symbol, self.message, self.symbol)
    }
}

const VALENTINES: Occasion = Occasion::new(
    OccasionKind::Valentines,
    "💕",
    "Happy Valentine's Day, Love!",
);
const BIRTHDAY: Occasion = Occasion::new(OccasionKind::Birthday, "🎂", "Happy Birthday, Love!");
const ANNIVERSARY: Occasion =
    Occasion::new(OccasionKind::Anniversary, "🎉", "Happy Anniversary!, Love!");
const MONTHSARY: Occasion = Occasion::new(OccasionKind::Monthsary, "🌹", "Happy Monthsary!, Love!");
const WEEKSARY: Occasion = Occasion::new(OccasionKind::Weeksary, "❤️", "Happy Weeksary!, Love!");

/// Returns the greeting for `now`, first matching rule wins:
/// Valentine's, birthday, anniversary, monthsary, then Wednesdays.
pub fn match_occasion<D: Datelike>(now: &D) -> Option<Occasion> {
    let (month, day) = (now.month(), now.day());

    match (month, day) {
        (2, 14) => Some(VALENTINES),
        (8, 30) => Some(BIRTHDAY),
        (6, 12) => Some(ANNIVERSARY),
        (_, 12) => Some(MONTHSARY),
        _ if now.weekday() == Weekday::Wed => Some(WEEKSARY),
        _ => None,
    }
}
