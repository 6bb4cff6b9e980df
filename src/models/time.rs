//! Wall-clock time helpers for matchday scheduling.
//!
//! All matchday times are civil wall-clock values local to the venue. The
//! engine never converts between timezones; dates and times combine and
//! shift with integer-minute arithmetic only.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Combine a matchday date with a start time into a kickoff timestamp.
pub fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Shift a kickoff timestamp forward by a whole number of minutes.
pub fn add_minutes(at: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    at + Duration::minutes(minutes)
}

/// Parse an operator-supplied time of day.
///
/// Accepts `HH:MM` (how the admin UI sends start times) as well as
/// `HH:MM:SS`.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("invalid time of day '{}': {}", s, e))
}

/// Render a kickoff timestamp the way conflict descriptions show it.
pub fn format_kickoff(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
