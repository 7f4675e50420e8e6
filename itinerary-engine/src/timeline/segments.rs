//! Travel segment construction.
//!
//! Turns one day's sorted stops plus the route service's per-leg output
//! into a sequence of directional segments between consecutive stops. The
//! segment list always has length `stops.len() - 1`; a pair of stops gets
//! `None` when either lacks a coordinate, a coordinate-less stop sits
//! between them in visit order, or no route could be fetched.

use tracing::debug;

use crate::domain::{Coordinate, Stop, TravelMode, TravelSegment};
use crate::routing::{RouteLeg, RouteProvider};

use super::config::TimelineConfig;

/// Map fetched legs onto consecutive stop pairs.
///
/// `legs` must be aligned to the subsequence of `stops` that have
/// coordinates: leg *k* covers the k-th adjacent pair of that subsequence.
/// A leg whose endpoints are not also adjacent in the full stop order is
/// consumed but produces no segment.
pub fn map_legs_to_segments(
    stops: &[Stop],
    legs: &[RouteLeg],
    config: &TimelineConfig,
) -> Vec<Option<TravelSegment>> {
    let mut segments: Vec<Option<TravelSegment>> = vec![None; stops.len().saturating_sub(1)];

    let routable: Vec<usize> = stops
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_routable())
        .map(|(i, _)| i)
        .collect();

    for (k, pair) in routable.windows(2).enumerate() {
        let Some(leg) = legs.get(k) else { break };

        let (a, b) = (pair[0], pair[1]);
        if b == a + 1 {
            segments[a] = Some(classify_leg(
                &stops[a],
                &stops[b],
                leg,
                config.walk_threshold_km,
                config,
            ));
        }
    }

    segments
}

/// Build one day's segments, fetching the route if there is anything to
/// route.
///
/// Issues at most one fetch, covering every coordinate-bearing stop in
/// order; with fewer than two routable stops no fetch happens at all.
pub async fn build_segments<P: RouteProvider + ?Sized>(
    provider: &P,
    stops: &[Stop],
    config: &TimelineConfig,
) -> Vec<Option<TravelSegment>> {
    let absent = vec![None; stops.len().saturating_sub(1)];

    let coordinates: Vec<Coordinate> = stops.iter().filter_map(|s| s.coordinate).collect();
    if coordinates.len() < 2 {
        return absent;
    }

    match provider.fetch_route(&coordinates).await {
        Some(route) => map_legs_to_segments(stops, &route.legs, config),
        None => {
            debug!(stops = stops.len(), "no route available for day, segments absent");
            absent
        }
    }
}

/// Compute the travel segment between exactly two stops.
///
/// Ad hoc variant for "distance between these two points" queries. Uses
/// the wider single-pair walking threshold, and falls back to a
/// speed-based estimate when the service reports no per-leg duration.
pub async fn calculate_travel_segment<P: RouteProvider + ?Sized>(
    provider: &P,
    from: &Stop,
    to: &Stop,
    config: &TimelineConfig,
) -> Option<TravelSegment> {
    let start = from.coordinate?;
    let end = to.coordinate?;

    let route = provider.fetch_route(&[start, end]).await?;

    let (distance_km, reported_mins) = match route.legs.first() {
        Some(leg) => (leg.distance_km, Some(leg.duration_mins)),
        None => (route.total_distance_km, None),
    };

    let segment = if distance_km > config.pair_walk_threshold_km {
        let duration = match reported_mins {
            Some(mins) => mins.round() as u32,
            None => config.walking_minutes(distance_km),
        };
        TravelSegment::new(&from.id, &to.id, distance_km, duration, TravelMode::Transit)
    } else {
        TravelSegment::new(
            &from.id,
            &to.id,
            distance_km,
            config.walking_minutes(distance_km),
            TravelMode::Walking,
        )
    };

    Some(segment)
}

/// Classify one consumed leg as a walking or transit segment.
///
/// Short legs become walks with the duration recomputed from pedestrian
/// speed; longer legs keep the service's reported duration, which tracks
/// motorized transit reasonably well.
fn classify_leg(
    from: &Stop,
    to: &Stop,
    leg: &RouteLeg,
    walk_threshold_km: f64,
    config: &TimelineConfig,
) -> TravelSegment {
    if leg.distance_km > walk_threshold_km {
        TravelSegment::new(
            &from.id,
            &to.id,
            leg.distance_km,
            leg.duration_mins.round() as u32,
            TravelMode::Transit,
        )
    } else {
        TravelSegment::new(
            &from.id,
            &to.id,
            leg.distance_km,
            config.walking_minutes(leg.distance_km),
            TravelMode::Walking,
        )
    }
}
