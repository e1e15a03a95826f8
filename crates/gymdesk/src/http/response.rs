//! HTTP response handling

use bytes::Bytes;
use gymdesk_transport::HttpResponse;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{Error, Result};

/// A response from the API, or a cached stand-in for one.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    from_cache: bool,
    elapsed: Duration,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            from_cache: false,
            elapsed: Duration::ZERO,
        }
    }

    /// A synthetic `200 OK` carrying a cached payload.
    pub fn cached(body: Bytes) -> Self {
        Self {
            from_cache: true,
            ..Self::new(StatusCode::OK, HeaderMap::new(), body)
        }
    }

    pub(crate) fn from_transport(raw: HttpResponse, elapsed: Duration) -> Result<Self> {
        let status = StatusCode::from_u16(raw.status)
            .map_err(|e| Error::ResponseValidation(format!("invalid status {}: {e}", raw.status)))?;
        Ok(Self {
            status,
            headers: raw.headers,
            body: raw.body,
            from_cache: false,
            elapsed,
        })
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Whether this response was served from the cache without a network call.
    pub fn from_cache(&self) -> bool {
        self.from_cache
    }

    /// Network time spent on this response; zero for cached responses.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Check if the response was successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response was an error.
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::ResponseValidation(e.to_string()))
    }

    /// Turn an error status into an [`Error`], otherwise parse the body.
    pub fn parse_result<T: DeserializeOwned>(self) -> Result<T> {
        if self.is_error() {
            return Err(Error::from_response(self.status.as_u16(), &self.text()));
        }
        self.json()
    }
}
