//! Travel segment types.
//!
//! A `TravelSegment` is the directed travel leg between two consecutive
//! stops of a day. Segments only exist between stops that both have
//! coordinates and are adjacent in visit order; everywhere else the day's
//! segment list carries `None`.

use serde::{Deserialize, Serialize};

/// How a segment is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Transit,
    Driving,
}

/// A directed travel leg between two consecutive stops.
///
/// Distance and duration are always non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelSegment {
    /// Id of the stop this segment departs from.
    pub from_id: String,

    /// Id of the stop this segment arrives at.
    pub to_id: String,

    /// Distance in kilometers.
    pub distance_km: f64,

    /// Travel duration in whole minutes.
    pub duration_mins: u32,

    /// Travel mode.
    pub mode: TravelMode,
}

impl TravelSegment {
    /// Create a new segment.
    pub fn new(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        distance_km: f64,
        duration_mins: u32,
        mode: TravelMode,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            distance_km,
            duration_mins,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_mode_tags() {
        let seg = TravelSegment::new("a", "b", 1.2, 15, TravelMode::Walking);
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["mode"], "walking");
        assert_eq!(json["fromId"], "a");
        assert_eq!(json["distanceKm"], 1.2);

        let seg = TravelSegment::new("a", "b", 8.0, 22, TravelMode::Transit);
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["mode"], "transit");
    }
}
