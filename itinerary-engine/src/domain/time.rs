//! Wall-clock time handling for day plans.
//!
//! Attraction opening hours and itinerary timestamps are exchanged as
//! "HH:MM" strings. This module provides a date-aware time type so that a
//! day whose schedule runs past midnight still compares and accumulates
//! correctly.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// Error returned when parsing an invalid time string.
///
/// Malformed time strings indicate a contract violation by the caller
/// (opening hours are passed through untrusted), so this propagates as an
/// error rather than being absorbed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A date-aware wall-clock time within a planned day.
///
/// All times are local to the day being planned; there is no timezone
/// handling. The date component exists so that accumulating travel and
/// dwell past midnight keeps ordering intact.
///
/// # Examples
///
/// ```
/// use itinerary_engine::domain::PlanTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 6, 12).unwrap();
/// let time = PlanTime::parse_hhmm("09:30", date).unwrap();
/// assert_eq!(time.to_string(), "09:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanTime {
    date: NaiveDate,
    time: NaiveTime,
}

impl PlanTime {
    /// Create a new time from date and time components.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Parse a time from "HH:MM" format with a given base date.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_engine::domain::PlanTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 6, 12).unwrap();
    ///
    /// assert!(PlanTime::parse_hhmm("00:00", date).is_ok());
    /// assert!(PlanTime::parse_hhmm("23:59", date).is_ok());
    ///
    /// assert!(PlanTime::parse_hhmm("930", date).is_err());
    /// assert!(PlanTime::parse_hhmm("9:30", date).is_err());
    /// assert!(PlanTime::parse_hhmm("25:00", date).is_err());
    /// ```
    pub fn parse_hhmm(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self { date, time })
    }

    /// Returns the date component.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Converts to a NaiveDateTime.
    pub fn to_datetime(&self) -> chrono::NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Add a whole number of minutes, rolling over midnight if needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_engine::domain::PlanTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 6, 12).unwrap();
    /// let time = PlanTime::parse_hhmm("23:30", date).unwrap();
    ///
    /// let later = time.add_minutes(45);
    /// assert_eq!(later.to_string(), "00:15");
    /// assert_eq!(later.date(), NaiveDate::from_ymd_opt(2026, 6, 13).unwrap());
    /// ```
    pub fn add_minutes(&self, minutes: u32) -> Self {
        *self + Duration::minutes(i64::from(minutes))
    }

    /// Add a duration to this time, advancing the date across midnight.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let dt = self.to_datetime().checked_add_signed(duration)?;
        Some(Self {
            date: dt.date(),
            time: dt.time(),
        })
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.to_datetime()
            .signed_duration_since(other.to_datetime())
    }
}

impl Add<Duration> for PlanTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(rhs).expect("time overflow")
    }
}

impl Ord for PlanTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_datetime().cmp(&other.to_datetime())
    }
}

impl PartialOrd for PlanTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for PlanTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlanTime({} {:02}:{:02})",
            self.date,
            self.hour(),
            self.minute()
        )
    }
}

impl fmt::Display for PlanTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    prop_compose! {
        fn valid_date()(
            year in 2000i32..2100,
            month in 1u32..=12,
            day in 1u32..=28  // Safe for all months
        ) -> NaiveDate {
            NaiveDate::from_ymd_opt(year, month, day).unwrap()
        }
    }

    proptest! {
        /// Any valid HH:MM string parses successfully
        #[test]
        fn valid_hhmm_parses(time_str in valid_time(), date in valid_date()) {
            prop_assert!(PlanTime::parse_hhmm(&time_str, date).is_ok());
        }

        /// Parse then display roundtrips
        #[test]
        fn parse_display_roundtrip(time_str in valid_time(), date in valid_date()) {
            let parsed = PlanTime::parse_hhmm(&time_str, date).unwrap();
            prop_assert_eq!(parsed.to_string(), time_str);
        }

        /// Adding minutes never moves time backwards
        #[test]
        fn add_minutes_monotonic(
            time_str in valid_time(),
            date in valid_date(),
            minutes in 0u32..3000
        ) {
            let t = PlanTime::parse_hhmm(&time_str, date).unwrap();
            prop_assert!(t.add_minutes(minutes) >= t);
        }

        /// Minute addition is associative over splits
        #[test]
        fn add_minutes_splits(
            time_str in valid_time(),
            date in valid_date(),
            a in 0u32..1000,
            b in 0u32..1000
        ) {
            let t = PlanTime::parse_hhmm(&time_str, date).unwrap();
            prop_assert_eq!(t.add_minutes(a).add_minutes(b), t.add_minutes(a + b));
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60, date in valid_date()) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(PlanTime::parse_hhmm(&s, date).is_err());
        }

        /// Invalid minute is rejected
        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100, date in valid_date()) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(PlanTime::parse_hhmm(&s, date).is_err());
        }

        /// Duration between is consistent with ordering
        #[test]
        fn duration_ordering_consistent(
            h1 in 0u32..24, m1 in 0u32..60,
            h2 in 0u32..24, m2 in 0u32..60,
            date in valid_date()
        ) {
            let t1 = PlanTime::new(date, NaiveTime::from_hms_opt(h1, m1, 0).unwrap());
            let t2 = PlanTime::new(date, NaiveTime::from_hms_opt(h2, m2, 0).unwrap());

            let dur = t2.signed_duration_since(t1);

            match t1.cmp(&t2) {
                Ordering::Less => prop_assert!(dur > Duration::zero()),
                Ordering::Greater => prop_assert!(dur < Duration::zero()),
                Ordering::Equal => prop_assert!(dur == Duration::zero()),
            }
        }
    }
}
