//! Route fetching.
//!
//! Wraps the external routing service behind the [`RouteProvider`] trait so
//! the rest of the engine can be tested without network access. Routing
//! unavailability is a normal, expected outcome: providers return `None`
//! for every failure mode, and downstream code stays null-tolerant
//! segment by segment.

mod client;
mod error;
mod mock;
mod types;

pub use client::{OsrmClient, OsrmConfig};
pub use error::RoutingError;
pub use mock::MockRouteProvider;

use async_trait::async_trait;

use crate::domain::Coordinate;

/// One leg of a fetched route, between two consecutive input coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    /// Leg distance in kilometers.
    pub distance_km: f64,

    /// Leg duration in minutes, as reported by the service.
    pub duration_mins: f64,
}

/// A route fetched from the routing service.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRoute {
    /// The route geometry as `(lat, lng)` points.
    pub path: Vec<Coordinate>,

    /// Total route distance in kilometers.
    pub total_distance_km: f64,

    /// One leg per consecutive input coordinate pair.
    pub legs: Vec<RouteLeg>,
}

/// Capability to fetch a route covering an ordered list of coordinates.
///
/// Implementations must issue at most one request per invocation covering
/// the entire list, and must return `None` (never an error) when the
/// service is unavailable, times out, responds with a non-success status,
/// or reports no usable route.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Fetch a route through `coordinates`, in order.
    ///
    /// Returns `None` when fewer than two coordinates are supplied or the
    /// service yields no usable route.
    async fn fetch_route(&self, coordinates: &[Coordinate]) -> Option<FetchedRoute>;
}
