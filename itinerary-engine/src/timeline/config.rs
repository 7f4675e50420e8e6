//! Configuration for timeline assembly.

/// Default start of a planned day.
const DEFAULT_DAY_START: &str = "09:00";

/// Default dwell at a stop when the caller left the duration unspecified.
const DEFAULT_DWELL_MINS: u32 = 60;

/// Walking/transit cutoff for legs within a day's batched route.
const DEFAULT_WALK_THRESHOLD_KM: f64 = 3.0;

/// Walking/transit cutoff for ad hoc single-pair queries.
const DEFAULT_PAIR_WALK_THRESHOLD_KM: f64 = 5.0;

/// Assumed pedestrian speed for recomputed walking durations.
const DEFAULT_WALKING_SPEED_KMH: f64 = 5.0;

/// Running clock past this time flags the day as rushed.
const DEFAULT_RUSH_THRESHOLD: &str = "21:00";

/// Tunable parameters for timeline assembly and conflict detection.
///
/// These are deployment-level knobs; the algorithms never hard-code them.
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Start of the day as "HH:MM".
    pub day_start: String,

    /// Dwell duration applied when a stop's duration is unspecified.
    pub default_dwell_mins: u32,

    /// Legs longer than this are classified as transit (batched routes).
    pub walk_threshold_km: f64,

    /// Legs longer than this are classified as transit (single-pair queries).
    pub pair_walk_threshold_km: f64,

    /// Pedestrian speed used to recompute walking durations, km/h.
    pub walking_speed_kmh: f64,

    /// Running clock past this "HH:MM" raises a rush conflict.
    pub rush_threshold: String,
}

impl TimelineConfig {
    /// Walking duration in whole minutes for a distance, rounded up.
    ///
    /// Public routing services occasionally report unrealistically short
    /// walking times for short hops; recomputing from a fixed pedestrian
    /// speed corrects that.
    pub fn walking_minutes(&self, distance_km: f64) -> u32 {
        (distance_km / self.walking_speed_kmh * 60.0).ceil() as u32
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            day_start: DEFAULT_DAY_START.to_string(),
            default_dwell_mins: DEFAULT_DWELL_MINS,
            walk_threshold_km: DEFAULT_WALK_THRESHOLD_KM,
            pair_walk_threshold_km: DEFAULT_PAIR_WALK_THRESHOLD_KM,
            walking_speed_kmh: DEFAULT_WALKING_SPEED_KMH,
            rush_threshold: DEFAULT_RUSH_THRESHOLD.to_string(),
        }
    }
}
