//! Wire types for the OSRM-compatible route service.
//!
//! The service reports distances in meters, durations in seconds, and
//! geometry as `[lng, lat]` pairs. Conversion to the engine's units
//! (kilometers, minutes, `(lat, lng)`) happens here, at the boundary.

use serde::Deserialize;

use crate::domain::Coordinate;

use super::{FetchedRoute, RouteLeg};

/// Top-level route service response.
///
/// `code` is `"Ok"` on success; any other value means no usable route.
#[derive(Debug, Deserialize)]
pub(super) struct RouteResponse {
    pub code: String,

    #[serde(default)]
    pub routes: Vec<RouteBody>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RouteBody {
    /// Total distance in meters.
    pub distance: f64,

    pub geometry: RouteGeometry,

    /// One leg per consecutive input coordinate pair.
    #[serde(default)]
    pub legs: Vec<LegBody>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RouteGeometry {
    /// GeoJSON coordinates: `[lng, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LegBody {
    /// Leg distance in meters.
    pub distance: f64,

    /// Leg duration in seconds.
    pub duration: f64,
}

impl RouteBody {
    /// Convert to engine units, reordering geometry to `(lat, lng)`.
    pub(super) fn into_fetched(self) -> FetchedRoute {
        let path = self
            .geometry
            .coordinates
            .into_iter()
            .map(|pair| Coordinate::new(pair[1], pair[0]))
            .collect();

        let legs = self
            .legs
            .into_iter()
            .map(|leg| RouteLeg {
                distance_km: leg.distance / 1000.0,
                duration_mins: leg.duration / 60.0,
            })
            .collect();

        FetchedRoute {
            path,
            total_distance_km: self.distance / 1000.0,
            legs,
        }
    }
}
