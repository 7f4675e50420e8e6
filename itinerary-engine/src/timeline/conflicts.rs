//! Scheduling conflict detection.
//!
//! A single sequential pass over the day's stops, carrying a running
//! wall-clock time: travel to each stop, dwell, and opening-hours checks.
//! Conflicts are results, not errors — the pass always completes.

use crate::domain::{Conflict, ConflictKind, PlanTime, Stop, TimeError, TravelSegment};

use super::config::TimelineConfig;

/// Duration of segment `idx`, treating absent segments as zero travel.
pub(super) fn segment_minutes(segments: &[Option<TravelSegment>], idx: usize) -> u32 {
    segments
        .get(idx)
        .and_then(|s| s.as_ref())
        .map(|s| s.duration_mins)
        .unwrap_or(0)
}

/// Detect scheduling conflicts for stops in visit order.
///
/// `segments` is the day's (possibly partially absent) segment list;
/// segment `i` covers travel from stop `i` to stop `i + 1`.
///
/// Rules, per stop:
/// - arrival before opening ⇒ late-arrival warning, and the clock waits at
///   the opening time;
/// - arrival at or after closing ⇒ closed error (suppresses overlap);
/// - otherwise departure past closing ⇒ overlap warning;
/// - a running clock past the rush threshold ⇒ rush warning, regardless of
///   opening hours. The check runs after any opening-time wait, so a day
///   stalled by a late opening can itself go rushed.
///
/// Opening-hours checks apply only when a stop declares both bounds.
pub fn detect_conflicts(
    stops: &[Stop],
    segments: &[Option<TravelSegment>],
    config: &TimelineConfig,
) -> Result<Vec<Conflict>, TimeError> {
    let Some(first) = stops.first() else {
        return Ok(Vec::new());
    };
    let base_date = first.date;

    let mut current = PlanTime::parse_hhmm(&config.day_start, base_date)?;
    let rush_threshold = PlanTime::parse_hhmm(&config.rush_threshold, base_date)?;

    let mut conflicts = Vec::new();

    for (i, stop) in stops.iter().enumerate() {
        if i > 0 {
            current = current.add_minutes(segment_minutes(segments, i - 1));
        }

        let arrival = current;
        let dwell = stop.dwell_mins(config.default_dwell_mins);

        // Where the visit actually starts: at arrival, or waiting for the
        // doors to open.
        let mut visit_start = arrival;

        if let (Some(open_s), Some(close_s)) =
            (stop.opening_time.as_deref(), stop.closing_time.as_deref())
        {
            let opening = PlanTime::parse_hhmm(open_s, base_date)?;
            let closing = PlanTime::parse_hhmm(close_s, base_date)?;

            if arrival < opening {
                conflicts.push(Conflict::new(
                    &stop.id,
                    ConflictKind::LateArrival,
                    format!(
                        "Arrives at {arrival} but {} opens at {opening}",
                        stop.name
                    ),
                ));
                visit_start = opening;
            }

            if arrival >= closing {
                conflicts.push(Conflict::new(
                    &stop.id,
                    ConflictKind::Closed,
                    format!(
                        "Arrives at {arrival}, at or after {} closes at {closing}",
                        stop.name
                    ),
                ));
            } else if visit_start.add_minutes(dwell) > closing {
                conflicts.push(Conflict::new(
                    &stop.id,
                    ConflictKind::Overlap,
                    format!("Visit at {} runs past closing time {closing}", stop.name),
                ));
            }
        }

        if visit_start > rush_threshold {
            conflicts.push(Conflict::new(
                &stop.id,
                ConflictKind::Rush,
                format!(
                    "Reaching {} at {visit_start}, after {rush_threshold}",
                    stop.name
                ),
            ));
        }

        current = visit_start.add_minutes(dwell);
    }

    Ok(conflicts)
}
