//! Stop types.
//!
//! A `Stop` is a point of interest scheduled for a given day. Stops are
//! supplied by the surrounding application and are read-only to the engine;
//! every computation builds fresh values around them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// What kind of stop this is.
///
/// Lodging anchors are modelled as a tagged variant rather than a sentinel
/// identifier so they can never collide with a real attraction id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    /// A regular point of interest.
    Attraction,
    /// A synthetic stop representing where the day begins and ends.
    Lodging,
}

/// A point of interest scheduled for a given day.
///
/// `duration_mins` distinguishes an explicit zero (e.g. a lodging anchor,
/// no dwell) from "unspecified", which falls back to the configured default.
/// A stop without a coordinate is excluded from routing but still occupies
/// its slot in the day's sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Identifier assigned by the surrounding application.
    pub id: String,

    /// Display name.
    pub name: String,

    /// City or region, for display only.
    pub city: Option<String>,

    /// Geographic coordinate; `None` for stops not yet geocoded.
    pub coordinate: Option<Coordinate>,

    /// Day number within the trip (1-based).
    pub day: u32,

    /// Calendar date of the visit.
    pub date: NaiveDate,

    /// Sequencing order within the day.
    pub order: u32,

    /// Visit duration in minutes. `Some(0)` is meaningful and preserved;
    /// `None` means unspecified.
    pub duration_mins: Option<u32>,

    /// Opening time as "HH:MM", if declared.
    pub opening_time: Option<String>,

    /// Closing time as "HH:MM", if declared.
    pub closing_time: Option<String>,

    /// Whether the user has marked this stop as visited. Not used by the
    /// engine; passed through unchanged.
    pub visited: bool,

    /// Stop kind.
    pub kind: StopKind,
}

impl Stop {
    /// Create a new attraction stop with the given identity and sequencing.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        day: u32,
        date: NaiveDate,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: None,
            coordinate: None,
            day,
            date,
            order,
            duration_mins: None,
            opening_time: None,
            closing_time: None,
            visited: false,
            kind: StopKind::Attraction,
        }
    }

    /// Set the coordinate.
    pub fn with_coordinate(mut self, lat: f64, lng: f64) -> Self {
        self.coordinate = Some(Coordinate::new(lat, lng));
        self
    }

    /// Set the visit duration in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_mins = Some(minutes);
        self
    }

    /// Set opening and closing times ("HH:MM").
    pub fn with_hours(mut self, opening: impl Into<String>, closing: impl Into<String>) -> Self {
        self.opening_time = Some(opening.into());
        self.closing_time = Some(closing.into());
        self
    }

    /// Mark this stop as a lodging anchor (zero dwell unless overridden).
    pub fn as_lodging(mut self) -> Self {
        self.kind = StopKind::Lodging;
        if self.duration_mins.is_none() {
            self.duration_mins = Some(0);
        }
        self
    }

    /// Resolve the dwell duration against a default.
    ///
    /// An explicit `Some(0)` stays zero; `None` takes the default.
    pub fn dwell_mins(&self, default_mins: u32) -> u32 {
        self.duration_mins.unwrap_or(default_mins)
    }

    /// Returns true if this stop can participate in routing.
    pub fn is_routable(&self) -> bool {
        self.coordinate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 12).unwrap()
    }

    #[test]
    fn dwell_default_applies_only_when_unspecified() {
        let unspecified = Stop::new("s1", "Louvre", 1, date(), 0);
        assert_eq!(unspecified.dwell_mins(60), 60);

        let explicit_zero = Stop::new("s2", "Hotel", 1, date(), 0).with_duration(0);
        assert_eq!(explicit_zero.dwell_mins(60), 0);

        let explicit = Stop::new("s3", "Orsay", 1, date(), 0).with_duration(90);
        assert_eq!(explicit.dwell_mins(60), 90);
    }

    #[test]
    fn lodging_defaults_to_zero_dwell() {
        let lodging = Stop::new("h1", "Hotel du Nord", 1, date(), 0).as_lodging();
        assert_eq!(lodging.kind, StopKind::Lodging);
        assert_eq!(lodging.dwell_mins(60), 0);

        // An explicit duration survives the lodging tag
        let lodging = Stop::new("h2", "Aparthotel", 1, date(), 0)
            .with_duration(30)
            .as_lodging();
        assert_eq!(lodging.dwell_mins(60), 30);
    }

    #[test]
    fn routable_requires_coordinate() {
        let stop = Stop::new("s1", "Louvre", 1, date(), 0);
        assert!(!stop.is_routable());

        let stop = stop.with_coordinate(48.8606, 2.3376);
        assert!(stop.is_routable());
    }

    #[test]
    fn serde_uses_camel_case() {
        let stop = Stop::new("s1", "Louvre", 1, date(), 0)
            .with_duration(45)
            .with_hours("09:00", "18:00");

        let json = serde_json::to_value(&stop).unwrap();
        assert_eq!(json["durationMins"], 45);
        assert_eq!(json["openingTime"], "09:00");
        assert_eq!(json["closingTime"], "18:00");
        assert_eq!(json["kind"], "attraction");
    }
}
