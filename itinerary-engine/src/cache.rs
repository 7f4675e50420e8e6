//! Per-day route caching and multi-day orchestration.
//!
//! Fans the route fetcher out across every day of a trip, keyed by the
//! identity of each day's stop set (ids, coordinates, order) plus any
//! lodging anchor. Recomputation triggered by unrelated state changes
//! (e.g. toggling a "visited" flag) hits the cache instead of the network.
//!
//! The cache is the only state that survives across computations, and it
//! is safe to evict at any time — eviction costs a network call, never
//! correctness.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::future::join_all;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Coordinate, DayTimeline, Stop};
use crate::routing::{FetchedRoute, RouteLeg, RouteProvider};
use crate::timeline::{TimelineConfig, TimelineError, assemble_timeline, map_legs_to_segments};

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached day routes.
    pub ttl: Duration,

    /// Maximum number of cached day routes.
    pub max_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 128,
        }
    }
}

/// The fetched route for one day, split around the lodging anchor.
///
/// `stop_legs` is aligned to consecutive pairs of the day's
/// coordinate-bearing stops, ready for segment construction. When a
/// lodging anchor was part of the fetch, the legs to and from it are kept
/// separately so the alignment holds.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRoute {
    /// Route geometry as `(lat, lng)` points, lodging included if anchored.
    pub path: Vec<Coordinate>,

    /// Total route distance in kilometers, lodging travel included.
    pub total_distance_km: f64,

    /// Legs between consecutive stops.
    pub stop_legs: Vec<RouteLeg>,

    /// Leg from the lodging anchor to the first stop, when anchored.
    pub lodging_leg: Option<RouteLeg>,

    /// Leg from the last stop back to the lodging anchor, when anchored.
    pub return_leg: Option<RouteLeg>,
}

/// Routes for every day of a trip, tagged with the generation that
/// produced them.
///
/// Days for which no route could be computed are absent from the map.
#[derive(Debug, Clone)]
pub struct TripRoutes {
    /// Generation token; compare via [`RouteOrchestrator::is_stale`].
    pub generation: u64,

    /// Fetched routes by day number.
    pub days: HashMap<u32, Arc<DayRoute>>,
}

impl TripRoutes {
    /// The route for one day, if any.
    pub fn day(&self, day: u32) -> Option<&Arc<DayRoute>> {
        self.days.get(&day)
    }
}

/// Lodging anchor identity for keying and fetching.
struct AnchorPoint {
    id: String,
    coordinate: Coordinate,
}

/// Fans route fetches out across days, caching per-day results by stop-set
/// identity.
pub struct RouteOrchestrator<P> {
    provider: P,
    cache: MokaCache<String, Arc<DayRoute>>,
    generation: AtomicU64,
}

impl<P: RouteProvider> RouteOrchestrator<P> {
    /// Create an orchestrator with default cache settings.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, &RouteCacheConfig::default())
    }

    /// Create an orchestrator with custom cache settings.
    pub fn with_config(provider: P, config: &RouteCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            provider,
            cache,
            generation: AtomicU64::new(0),
        }
    }

    /// Compute routes for every day of a trip.
    ///
    /// Days are fetched concurrently — each day's route has no dependency
    /// on any other day — with a yield before each fetch so already-computed
    /// days can render first. A day is skipped (absent from the result)
    /// when it has nothing to route or the service yields no route.
    ///
    /// When `lodging` has a coordinate it is prepended and appended to each
    /// day's route, so travel to and from lodging is part of the path and
    /// the totals.
    pub async fn plan_trip_routes(
        &self,
        days: &BTreeMap<u32, Vec<Stop>>,
        lodging: Option<&Stop>,
    ) -> TripRoutes {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let anchor = lodging.and_then(|stop| {
            stop.coordinate.map(|coordinate| AnchorPoint {
                id: stop.id.clone(),
                coordinate,
            })
        });
        let anchor = anchor.as_ref();

        let futures: Vec<_> = days
            .iter()
            .map(|(day, stops)| async move {
                let route = self.day_route(*day, stops, anchor).await?;
                Some((*day, route))
            })
            .collect();

        let results = join_all(futures).await;

        TripRoutes {
            generation,
            days: results.into_iter().flatten().collect(),
        }
    }

    /// Build a timeline for every day of a trip from the (cached) routes.
    ///
    /// One orchestrated pass for multi-day views: routes are planned as in
    /// [`plan_trip_routes`](Self::plan_trip_routes), then each day is
    /// assembled from its cached legs without further fetching. Days with
    /// no stops are skipped.
    pub async fn build_trip_timelines(
        &self,
        days: &BTreeMap<u32, Vec<Stop>>,
        lodging: Option<&Stop>,
        config: &TimelineConfig,
    ) -> Result<BTreeMap<u32, DayTimeline>, TimelineError> {
        let routes = self.plan_trip_routes(days, lodging).await;

        let mut timelines = BTreeMap::new();
        for (day, stops) in days {
            if stops.is_empty() {
                continue;
            }

            let mut sorted = stops.clone();
            sorted.sort_by_key(|s| s.order);

            let segments = match routes.day(*day) {
                Some(route) => map_legs_to_segments(&sorted, &route.stop_legs, config),
                None => vec![None; sorted.len() - 1],
            };

            if let Some(timeline) = assemble_timeline(&sorted, segments, config)? {
                timelines.insert(*day, timeline);
            }
        }

        Ok(timelines)
    }

    /// Returns true if a newer plan has superseded `routes`.
    ///
    /// An in-flight computation is allowed to finish; callers use this to
    /// discard its result instead of overwriting fresher state.
    pub fn is_stale(&self, routes: &TripRoutes) -> bool {
        routes.generation != self.generation.load(Ordering::SeqCst)
    }

    /// Number of cached day routes.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop every cached route.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    async fn day_route(
        &self,
        day: u32,
        stops: &[Stop],
        anchor: Option<&AnchorPoint>,
    ) -> Option<Arc<DayRoute>> {
        let mut routable: Vec<&Stop> = stops.iter().filter(|s| s.is_routable()).collect();
        routable.sort_by_key(|s| s.order);

        // Without an anchor a single stop has nothing to route.
        if routable.is_empty() || (anchor.is_none() && routable.len() < 2) {
            return None;
        }

        let key = day_key(day, &routable, anchor);

        if let Some(hit) = self.cache.get(&key).await {
            debug!(day, "day route cache hit");
            return Some(hit);
        }

        // Let already-computed days reach the caller before this fetch.
        tokio::task::yield_now().await;

        let mut coordinates = Vec::with_capacity(routable.len() + 2);
        if let Some(a) = anchor {
            coordinates.push(a.coordinate);
        }
        coordinates.extend(routable.iter().filter_map(|s| s.coordinate));
        if let Some(a) = anchor {
            coordinates.push(a.coordinate);
        }

        let fetched = self.provider.fetch_route(&coordinates).await?;
        let route = Arc::new(split_route(fetched, anchor.is_some()));

        // Only successes are cached; an outage is retried next time.
        self.cache.insert(key, Arc::clone(&route)).await;

        Some(route)
    }
}

/// Identity key for one day's route: every routable stop's id, coordinate
/// and order, plus the anchor's id and coordinate. Fields like the visited
/// flag deliberately stay out so cosmetic changes don't invalidate.
fn day_key(day: u32, routable: &[&Stop], anchor: Option<&AnchorPoint>) -> String {
    let mut key = format!("d{day}");

    for stop in routable {
        if let Some(c) = stop.coordinate {
            let _ = write!(key, "|{}@{:.6},{:.6}#{}", stop.id, c.lat, c.lng, stop.order);
        }
    }

    if let Some(a) = anchor {
        let _ = write!(
            key,
            "|lodging:{}@{:.6},{:.6}",
            a.id, a.coordinate.lat, a.coordinate.lng
        );
    }

    key
}

/// Split a fetched route's legs around the lodging anchor.
fn split_route(route: FetchedRoute, anchored: bool) -> DayRoute {
    let FetchedRoute {
        path,
        total_distance_km,
        legs,
    } = route;

    if anchored && legs.len() >= 2 {
        let mut legs = legs;
        let return_leg = legs.pop();
        let lodging_leg = Some(legs.remove(0));

        DayRoute {
            path,
            total_distance_km,
            stop_legs: legs,
            lodging_leg,
            return_leg,
        }
    } else {
        DayRoute {
            path,
            total_distance_km,
            stop_legs: legs,
            lodging_leg: None,
            return_leg: None,
        }
    }
}
