//! Mock route provider for testing without network access.
//!
//! Serves a queue of canned responses and counts invocations, so tests can
//! assert both what the engine computed and whether it issued a fetch at
//! all.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::Coordinate;

use super::{FetchedRoute, RouteLeg, RouteProvider};

/// Mock provider serving canned routes in FIFO order.
///
/// Once the queue is exhausted (or if it was never filled), every fetch
/// returns `None` — the same shape as an unreachable routing service.
#[derive(Debug, Clone, Default)]
pub struct MockRouteProvider {
    responses: Arc<Mutex<VecDeque<Option<FetchedRoute>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockRouteProvider {
    /// Create a provider with an empty queue (every fetch yields `None`).
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that behaves like an unreachable routing service.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub async fn push_route(&self, route: FetchedRoute) {
        self.responses.lock().await.push_back(Some(route));
    }

    /// Queue an explicit failure.
    pub async fn push_failure(&self) {
        self.responses.lock().await.push_back(None);
    }

    /// Number of fetches issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Build a straight-line route with one leg per coordinate pair.
    ///
    /// Convenience for tests: `legs` supplies `(distance_km, duration_mins)`
    /// pairs; the path is just the input coordinates.
    pub fn route_with_legs(path: Vec<Coordinate>, legs: Vec<(f64, f64)>) -> FetchedRoute {
        let total = legs.iter().map(|(d, _)| d).sum();
        FetchedRoute {
            path,
            total_distance_km: total,
            legs: legs
                .into_iter()
                .map(|(distance_km, duration_mins)| RouteLeg {
                    distance_km,
                    duration_mins,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl RouteProvider for MockRouteProvider {
    async fn fetch_route(&self, coordinates: &[Coordinate]) -> Option<FetchedRoute> {
        if coordinates.len() < 2 {
            return None;
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses.lock().await.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> Vec<Coordinate> {
        vec![Coordinate::new(48.0, 2.0), Coordinate::new(48.1, 2.1)]
    }

    #[tokio::test]
    async fn serves_responses_in_order() {
        let mock = MockRouteProvider::new();
        mock.push_route(MockRouteProvider::route_with_legs(
            coords(),
            vec![(1.0, 12.0)],
        ))
        .await;
        mock.push_failure().await;

        let first = mock.fetch_route(&coords()).await;
        assert!(first.is_some());

        let second = mock.fetch_route(&coords()).await;
        assert!(second.is_none());

        // Exhausted queue keeps returning None
        let third = mock.fetch_route(&coords()).await;
        assert!(third.is_none());

        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn short_input_does_not_count_as_call() {
        let mock = MockRouteProvider::new();

        assert!(mock.fetch_route(&[Coordinate::new(48.0, 2.0)]).await.is_none());
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn route_with_legs_sums_total() {
        let route = MockRouteProvider::route_with_legs(coords(), vec![(1.5, 18.0), (2.5, 30.0)]);
        assert!((route.total_distance_km - 4.0).abs() < 1e-9);
        assert_eq!(route.legs.len(), 2);
    }
}
