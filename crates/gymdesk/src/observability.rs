//! Centralized observability utilities for structured logging
//!
//! Every request that goes through the client is logged from here, so log
//! fields stay consistent between the cache path, the network path and the
//! failure path.

use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::error::{ApiFailure, Error};

/// HTTP request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path, query string included
    pub path: String,
    /// Request body size in bytes (optional)
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            path = %self.path,
            body_size = self.body_size,
            "Sending HTTP request"
        );
    }

    /// Log a read answered from the cache
    pub fn log_cache_hit(&self) {
        debug!(method = %self.method, path = %self.path, "Cache hit");
    }
}

/// HTTP response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes (optional)
    pub body_size: Option<usize>,
    /// Time elapsed for the request
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: u16, elapsed: Duration) -> Self {
        Self {
            status,
            body_size: None,
            elapsed,
        }
    }

    /// Set the response body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log successful response
    pub fn log_success(&self, request: &RequestMetadata) {
        info!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            "HTTP request succeeded"
        );
    }

    /// Log failed response
    pub fn log_error(&self, request: &RequestMetadata, error: &str) {
        warn!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            error = %error,
            "HTTP request failed"
        );
    }
}

/// Log the status-specific diagnostic for a failed response.
pub fn log_failure(request: &RequestMetadata, failure: &ApiFailure) {
    let path = request.path.as_str();
    match failure.status {
        401 => warn!(path = %path, "Session expired, redirecting to login"),
        403 => warn!(path = %path, message = ?failure.message, "Access forbidden"),
        404 => warn!(path = %path, "Resource not found"),
        422 => warn!(
            path = %path,
            message = ?failure.message,
            errors = ?failure.errors,
            "Validation error"
        ),
        s if s >= 500 => error!(path = %path, status = s, body = %failure.body, "Server error"),
        s => debug!(path = %path, status = s, "API error"),
    }
}

/// Log a request that never produced a status.
pub fn log_transport_failure(request: &RequestMetadata, err: &Error, elapsed: Duration) {
    if err.is_timeout() {
        error!(
            method = %request.method,
            path = %request.path,
            elapsed_ms = elapsed.as_millis(),
            "Request timeout - is your backend running?"
        );
    } else {
        warn!(
            method = %request.method,
            path = %request.path,
            elapsed_ms = elapsed.as_millis(),
            error = %err,
            "HTTP request failed before a response arrived"
        );
    }
}

/// Timer for measuring request duration
#[derive(Debug)]
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `gymdesk=info` when `RUST_LOG` is unset. Calling it twice is
/// harmless; the second call is ignored.
#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gymdesk=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_metadata_creation() {
        let metadata = RequestMetadata::new("GET", "/members?page=2");
        assert_eq!(metadata.method, "GET");
        assert_eq!(metadata.path, "/members?page=2");
        assert_eq!(metadata.body_size, None);
    }

    #[test]
    fn test_request_metadata_with_body_size() {
        let metadata = RequestMetadata::new("POST", "/members").with_body_size(128);
        assert_eq!(metadata.body_size, Some(128));
    }

    #[test]
    fn test_response_metadata_creation() {
        let elapsed = Duration::from_millis(120);
        let metadata = ResponseMetadata::new(200, elapsed).with_body_size(42);
        assert_eq!(metadata.status, 200);
        assert_eq!(metadata.elapsed, elapsed);
        assert_eq!(metadata.body_size, Some(42));
    }

    #[test]
    fn test_log_helpers_accept_every_status() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let request = RequestMetadata::new("GET", "/payments");

        for status in [400, 401, 403, 404, 422, 500, 503] {
            log_failure(&request, &ApiFailure::from_body(status, r#"{"message":"x"}"#));
        }
        log_transport_failure(&request, &Error::Timeout(Duration::from_secs(10)), Duration::ZERO);
    }

    #[test]
    fn test_request_timer() {
        let timer = RequestTimer::start();
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed() >= Duration::from_millis(10));
    }
}
