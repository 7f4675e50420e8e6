//! Day timeline assembly.
//!
//! Orchestrates one day: sort stops by declared order, build (or accept)
//! segments, detect conflicts, annotate each stop with arrival/departure
//! times, and aggregate totals into one immutable [`DayTimeline`].
//!
//! The annotation pass deliberately re-runs the same sequential
//! accumulation as conflict detection instead of sharing its state, so the
//! two stay decoupled and individually testable.

use tracing::debug;

use crate::domain::{
    DayTimeline, PlanTime, ScheduledStop, Stop, TimeError, TravelSegment,
};
use crate::routing::RouteProvider;

use super::config::TimelineConfig;
use super::conflicts::{detect_conflicts, segment_minutes};
use super::segments::{build_segments, calculate_travel_segment};

/// Error from timeline assembly.
///
/// Routing problems never surface here — they become absent segments.
/// This only reports contract violations by the caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TimelineError {
    /// A stop carried a malformed time string.
    #[error("invalid stop time: {0}")]
    Time(#[from] TimeError),
}

/// Builds day timelines against a route provider.
///
/// Generic over [`RouteProvider`] so it can run against the live routing
/// client or a mock.
#[derive(Debug, Clone)]
pub struct TimelinePlanner<P> {
    provider: P,
    config: TimelineConfig,
}

impl<P: RouteProvider> TimelinePlanner<P> {
    /// Create a planner with default configuration.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: TimelineConfig::default(),
        }
    }

    /// Create a planner with a custom configuration.
    pub fn with_config(provider: P, config: TimelineConfig) -> Self {
        Self { provider, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Build the timeline for one day's stops.
    ///
    /// Stops may arrive in any order; they are sorted by declared `order`.
    /// `precomputed` segments are used verbatim when their count matches
    /// `stops.len() - 1`, skipping the route fetch entirely — callers use
    /// this to avoid a network round trip when only a cosmetic field (e.g.
    /// the visited flag) changed. Returns `Ok(None)` for an empty stop set.
    pub async fn build_day_timeline(
        &self,
        stops: &[Stop],
        precomputed: Option<Vec<Option<TravelSegment>>>,
    ) -> Result<Option<DayTimeline>, TimelineError> {
        if stops.is_empty() {
            return Ok(None);
        }

        let mut sorted = stops.to_vec();
        sorted.sort_by_key(|s| s.order);

        let segments = match precomputed {
            Some(segs) if segs.len() == sorted.len() - 1 => segs,
            Some(segs) => {
                debug!(
                    supplied = segs.len(),
                    expected = sorted.len() - 1,
                    "precomputed segment count mismatch, rebuilding"
                );
                build_segments(&self.provider, &sorted, &self.config).await
            }
            None => build_segments(&self.provider, &sorted, &self.config).await,
        };

        assemble_timeline(&sorted, segments, &self.config)
    }

    /// Compute the travel segment between exactly two stops.
    pub async fn travel_segment_between(
        &self,
        from: &Stop,
        to: &Stop,
    ) -> Option<TravelSegment> {
        calculate_travel_segment(&self.provider, from, to, &self.config).await
    }
}

/// Assemble a timeline from already-sorted stops and their segments.
///
/// This is the pure tail of [`TimelinePlanner::build_day_timeline`]; the
/// multi-day orchestrator uses it directly with cached legs.
pub fn assemble_timeline(
    sorted: &[Stop],
    segments: Vec<Option<TravelSegment>>,
    config: &TimelineConfig,
) -> Result<Option<DayTimeline>, TimelineError> {
    let Some(first) = sorted.first() else {
        return Ok(None);
    };

    let conflicts = detect_conflicts(sorted, &segments, config)?;
    let scheduled = annotate_stops(sorted, &segments, config)?;

    let total_distance_km = segments
        .iter()
        .flatten()
        .map(|s| s.distance_km)
        .sum();
    let total_travel_mins = segments.iter().flatten().map(|s| s.duration_mins).sum();

    let end_time = scheduled
        .last()
        .map(|s| s.departure_time.clone())
        .unwrap_or_else(|| config.day_start.clone());

    Ok(Some(DayTimeline {
        date: first.date,
        day: first.day,
        stops: scheduled,
        segments,
        conflicts,
        total_distance_km,
        total_travel_mins,
        start_time: config.day_start.clone(),
        end_time,
    }))
}

/// Annotate stops with arrival and departure times.
///
/// Same accumulation rule as conflict detection: travel, wait for opening
/// if arriving early, dwell. The recorded arrival is the raw arrival (the
/// time the visitor actually shows up); the departure reflects any wait.
fn annotate_stops(
    stops: &[Stop],
    segments: &[Option<TravelSegment>],
    config: &TimelineConfig,
) -> Result<Vec<ScheduledStop>, TimelineError> {
    let Some(first) = stops.first() else {
        return Ok(Vec::new());
    };
    let base_date = first.date;

    let mut current = PlanTime::parse_hhmm(&config.day_start, base_date)?;
    let mut scheduled = Vec::with_capacity(stops.len());

    for (i, stop) in stops.iter().enumerate() {
        if i > 0 {
            current = current.add_minutes(segment_minutes(segments, i - 1));
        }

        let arrival = current;
        let dwell = stop.dwell_mins(config.default_dwell_mins);

        let mut visit_start = arrival;
        if let (Some(open_s), Some(close_s)) =
            (stop.opening_time.as_deref(), stop.closing_time.as_deref())
        {
            let opening = PlanTime::parse_hhmm(open_s, base_date)?;
            // Closing is validated here too; a malformed string is a
            // contract violation regardless of which pass sees it first.
            PlanTime::parse_hhmm(close_s, base_date)?;

            if arrival < opening {
                visit_start = opening;
            }
        }

        let departure = visit_start.add_minutes(dwell);

        scheduled.push(ScheduledStop {
            stop: stop.clone(),
            arrival_time: arrival.to_string(),
            departure_time: departure.to_string(),
        });

        current = departure;
    }

    Ok(scheduled)
}
