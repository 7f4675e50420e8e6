//! Routing client error types.
//!
//! These describe why a fetch failed. They stay internal to the routing
//! layer: at the [`RouteProvider`](super::RouteProvider) boundary every
//! failure collapses to "no route", logged as a warning.

/// Errors from the routing HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("routing API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be parsed.
    #[error("routing response parse error: {0}")]
    Json(String),

    /// The service answered but reported no usable route.
    #[error("no route found (code {code})")]
    NoRoute { code: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RoutingError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "routing API error 503: Service Unavailable");

        let err = RoutingError::NoRoute {
            code: "NoSegment".into(),
        };
        assert_eq!(err.to_string(), "no route found (code NoSegment)");

        let err = RoutingError::Json("expected value".into());
        assert!(err.to_string().contains("parse error"));
    }
}
