//! Standalone arrival time calculation.
//!
//! A state-free function for consumers that only need one number — e.g. a
//! UI label previewing a reorder — without rebuilding the whole day. It
//! deliberately duplicates the assembler's accumulation walk rather than
//! depending on it, so it can run against partial or synthetic stop lists.

use crate::domain::{PlanTime, Stop, TimeError, TravelSegment};

use super::config::TimelineConfig;
use super::conflicts::segment_minutes;

/// Compute the wall-clock arrival time at `target`, as "HH:MM".
///
/// Walks stops `0..target`, accumulating each stop's dwell and each
/// preceding segment's travel (waiting at opening times exactly like the
/// assembler), then adds the travel duration of the segment arriving at
/// `target`, if present. With no preceding stops or segments this is just
/// `start_time` (default `09:00`).
pub fn calculate_arrival_time(
    stops: &[Stop],
    segments: &[Option<TravelSegment>],
    target: usize,
    start_time: Option<&str>,
) -> Result<String, TimeError> {
    calculate_arrival_time_with(stops, segments, target, start_time, &TimelineConfig::default())
}

/// [`calculate_arrival_time`] with explicit configuration.
pub fn calculate_arrival_time_with(
    stops: &[Stop],
    segments: &[Option<TravelSegment>],
    target: usize,
    start_time: Option<&str>,
    config: &TimelineConfig,
) -> Result<String, TimeError> {
    let base_date = stops.first().map(|s| s.date).unwrap_or_default();
    let start = start_time.unwrap_or(&config.day_start);

    let mut current = PlanTime::parse_hhmm(start, base_date)?;

    for (i, stop) in stops.iter().take(target).enumerate() {
        if i > 0 {
            current = current.add_minutes(segment_minutes(segments, i - 1));
        }

        if let (Some(open_s), Some(close_s)) =
            (stop.opening_time.as_deref(), stop.closing_time.as_deref())
        {
            let opening = PlanTime::parse_hhmm(open_s, base_date)?;
            PlanTime::parse_hhmm(close_s, base_date)?;
            if current < opening {
                current = opening;
            }
        }

        current = current.add_minutes(stop.dwell_mins(config.default_dwell_mins));
    }

    if target > 0 {
        current = current.add_minutes(segment_minutes(segments, target - 1));
    }

    Ok(current.to_string())
}
