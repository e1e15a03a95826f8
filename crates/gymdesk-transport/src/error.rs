//! Transport error types

use std::time::Duration;
use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur before an HTTP status is available.
///
/// A response with an error status is *not* a transport error; it comes
/// back as an [`HttpResponse`](crate::HttpResponse) for the caller to
/// interpret.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the configured bound.
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    /// Could not reach the server.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other failure while sending or reading the response.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Body encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TransportError {
    /// Whether this failure was the transport's own time bound firing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
