//! OSRM-compatible routing HTTP client.
//!
//! Issues exactly one request per invocation covering the entire ordered
//! coordinate list: a single batched call amortizes round-trip latency and
//! keeps leg timings internally consistent. Every failure mode — timeout,
//! transport error, non-success status, empty result — is collapsed to
//! "no route" at the [`RouteProvider`] boundary.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::warn;

use crate::domain::Coordinate;

use super::error::RoutingError;
use super::types::RouteResponse;
use super::{FetchedRoute, RouteProvider};

/// Default base URL for the public OSRM demo server.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default routing profile.
const DEFAULT_PROFILE: &str = "driving";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default request timeout. A request-scoped timeout guarantees a fetch
/// can never hang the caller indefinitely.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the route service.
    pub base_url: String,
    /// Routing profile segment of the URL (e.g. "driving", "foot").
    pub profile: String,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the routing profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Routing client for an OSRM-compatible `route` service.
///
/// Uses a semaphore to bound concurrent requests, since multi-day planning
/// fans fetches out across days.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
    semaphore: Arc<Semaphore>,
}

impl OsrmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            profile: config.profile,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Serialize coordinates as `lng,lat;lng,lat;...` for the URL path.
    fn coordinate_path(coordinates: &[Coordinate]) -> String {
        coordinates
            .iter()
            .map(|c| format!("{},{}", c.lng, c.lat))
            .collect::<Vec<_>>()
            .join(";")
    }

    async fn request_route(
        &self,
        coordinates: &[Coordinate],
    ) -> Result<FetchedRoute, RoutingError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RoutingError::Api {
                status: 0,
                message: "semaphore closed".to_string(),
            })?;

        let url = format!(
            "{}/route/v1/{}/{}",
            self.base_url,
            self.profile,
            Self::coordinate_path(coordinates)
        );

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: RouteResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json(e.to_string()))?;

        if parsed.code != "Ok" {
            return Err(RoutingError::NoRoute { code: parsed.code });
        }

        let route = parsed
            .routes
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRoute {
                code: "EmptyRoutes".to_string(),
            })?;

        Ok(route.into_fetched())
    }
}

#[async_trait]
impl RouteProvider for OsrmClient {
    async fn fetch_route(&self, coordinates: &[Coordinate]) -> Option<FetchedRoute> {
        if coordinates.len() < 2 {
            return None;
        }

        match self.request_route(coordinates).await {
            Ok(route) => Some(route),
            Err(e) => {
                warn!(
                    waypoints = coordinates.len(),
                    error = %e,
                    "route fetch failed, continuing without route"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = OsrmConfig::new()
            .with_base_url("http://localhost:5000")
            .with_profile("foot")
            .with_max_concurrent(8)
            .with_timeout(10);

        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.profile, "foot");
        assert_eq!(config.max_concurrent, 8);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_defaults() {
        let config = OsrmConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.profile, DEFAULT_PROFILE);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let client = OsrmClient::new(OsrmConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn coordinate_path_is_lng_lat() {
        let coords = vec![
            Coordinate::new(48.8606, 2.3376),
            Coordinate::new(48.8602, 2.3266),
        ];

        // lng first, lat second, semicolon-separated
        assert_eq!(
            OsrmClient::coordinate_path(&coords),
            "2.3376,48.8606;2.3266,48.8602"
        );
    }

    #[tokio::test]
    async fn fewer_than_two_coordinates_is_no_route() {
        let client = OsrmClient::new(OsrmConfig::default()).unwrap();

        assert!(client.fetch_route(&[]).await.is_none());
        assert!(
            client
                .fetch_route(&[Coordinate::new(48.0, 2.0)])
                .await
                .is_none()
        );
    }

    // Live request tests would need a reachable OSRM instance; the rest of
    // the engine is exercised against MockRouteProvider instead.
}
