//! Day timeline types.
//!
//! A `DayTimeline` is the assembled result for one day: stops in visit
//! order with computed times, the segments between them, detected
//! conflicts, and aggregate totals. Timelines are value objects —
//! constructed fresh on every computation and never mutated in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Conflict, Stop, TravelSegment};

/// A stop annotated with its computed arrival and departure times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledStop {
    /// The stop, passed through unchanged.
    pub stop: Stop,

    /// Computed arrival time as "HH:MM".
    pub arrival_time: String,

    /// Computed departure time as "HH:MM".
    pub departure_time: String,
}

/// The assembled itinerary for one day.
///
/// `segments` always has length `stops.len() - 1`; an entry is `None`
/// whenever no route could be computed for that pair of stops. Absent
/// segments contribute zero to the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTimeline {
    /// Calendar date this timeline represents.
    pub date: NaiveDate,

    /// Day number within the trip.
    pub day: u32,

    /// Stops in visit order with computed times.
    pub stops: Vec<ScheduledStop>,

    /// Travel segments between consecutive stops.
    pub segments: Vec<Option<TravelSegment>>,

    /// Detected scheduling conflicts.
    pub conflicts: Vec<Conflict>,

    /// Sum of all present segment distances, in kilometers.
    pub total_distance_km: f64,

    /// Sum of all present segment durations, in minutes.
    pub total_travel_mins: u32,

    /// The day's start time as "HH:MM".
    pub start_time: String,

    /// The day's end time (last departure) as "HH:MM".
    pub end_time: String,
}

impl DayTimeline {
    /// Returns true if any conflict carries error severity.
    pub fn has_errors(&self) -> bool {
        self.conflicts
            .iter()
            .any(|c| c.severity == super::Severity::Error)
    }

    /// Number of segments that could actually be routed.
    pub fn routed_segment_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_some()).count()
    }
}
