//! Error types for the gymdesk client
//!
//! Two layers live here. [`Error`] is the raw failure: one variant per HTTP
//! status family plus the non-HTTP failure modes, carrying whatever the
//! server sent. [`NormalizedError`] is what screens display: a single
//! message string and an [`ErrorKind`] for programmatic branching, produced
//! by [`Error::normalize`], which never fails.

use std::collections::BTreeMap;
use std::time::Duration;

use gymdesk_core::error_boundary;
use gymdesk_transport::TransportError;
use thiserror::Error;

/// Result type alias for operations that can fail with a gymdesk error.
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when nothing better is available.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Message shown for every timeout, whichever layer raised it.
pub const TIMEOUT_MESSAGE: &str = "Request timeout - is your backend running?";

/// Main error type for the gymdesk client.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad request (400).
    #[error("Request failed with status code {}", .0.status)]
    BadRequest(ApiFailure),

    /// Missing or rejected bearer token (401).
    #[error("Request failed with status code {}", .0.status)]
    Unauthorized(ApiFailure),

    /// Authenticated but not allowed (403).
    #[error("Request failed with status code {}", .0.status)]
    Forbidden(ApiFailure),

    /// Resource not found (404).
    #[error("Request failed with status code {}", .0.status)]
    NotFound(ApiFailure),

    /// Validation failed (422).
    #[error("Request failed with status code {}", .0.status)]
    UnprocessableEntity(ApiFailure),

    /// Server-side failure (500+).
    #[error("Request failed with status code {}", .0.status)]
    InternalServerError(ApiFailure),

    /// Any other non-success status.
    #[error("Request failed with status code {}", .0.status)]
    ApiError(ApiFailure),

    /// The transport's own time bound fired.
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    /// A hook's deadline fired before its producer settled.
    #[error("Request timeout - please check your connection")]
    DeadlineExceeded(Duration),

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failed to deserialize a response body.
    #[error("Failed to parse API response: {0}")]
    ResponseValidation(String),

    /// The request could not be constructed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid base address or path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Session storage could not be read or written.
    #[error("Session storage error: {0}")]
    Session(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

error_boundary!(TransportError => Error, |e| match e {
    TransportError::Timeout(bound) => Error::Timeout(bound),
    TransportError::Connection(msg) | TransportError::Http(msg) => Error::Connection(msg),
    TransportError::InvalidRequest(msg) => Error::InvalidRequest(msg),
    TransportError::Serialization(err) => Error::Serialization(err),
});

/// What the server said about a failed request.
///
/// The backend reports failures as `{ "message": "...", "errors": { field: [..] } }`;
/// both fields are optional and anything unparseable is kept only as `body`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiFailure {
    /// HTTP status code
    pub status: u16,
    /// Human-readable `message` field, if the body had one
    pub message: Option<String>,
    /// Per-field validation messages, if the body had them
    pub errors: Option<BTreeMap<String, Vec<String>>>,
    /// Raw response body
    pub body: String,
}

impl ApiFailure {
    /// Parse a failure body leniently.
    pub fn from_body(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();

        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_owned);

        let errors = parsed
            .as_ref()
            .and_then(|v| v.get("errors"))
            .cloned()
            .and_then(|e| serde_json::from_value::<BTreeMap<String, Vec<String>>>(e).ok())
            .filter(|e| !e.is_empty());

        Self {
            status,
            message,
            errors,
            body: body.to_string(),
        }
    }

    /// Whether the server returned per-field validation errors.
    pub fn has_field_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    fn status_kind(&self) -> Option<ErrorKind> {
        match self.status {
            401 => Some(ErrorKind::Unauthorized),
            403 => Some(ErrorKind::Forbidden),
            404 => Some(ErrorKind::NotFound),
            422 if self.has_field_errors() => Some(ErrorKind::Validation),
            _ => None,
        }
    }
}

impl Error {
    /// Create an API error from an HTTP response status and body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let failure = ApiFailure::from_body(status, body);
        match status {
            400 => Error::BadRequest(failure),
            401 => Error::Unauthorized(failure),
            403 => Error::Forbidden(failure),
            404 => Error::NotFound(failure),
            422 => Error::UnprocessableEntity(failure),
            s if s >= 500 => Error::InternalServerError(failure),
            _ => Error::ApiError(failure),
        }
    }

    /// The server's failure details, for HTTP status errors.
    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            Error::BadRequest(f)
            | Error::Unauthorized(f)
            | Error::Forbidden(f)
            | Error::NotFound(f)
            | Error::UnprocessableEntity(f)
            | Error::InternalServerError(f)
            | Error::ApiError(f) => Some(f),
            _ => None,
        }
    }

    /// HTTP status code, for HTTP status errors.
    pub fn status(&self) -> Option<u16> {
        self.failure().map(|f| f.status)
    }

    /// Whether either timeout layer produced this error.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::DeadlineExceeded(_) | Error::Timeout(_) => true,
            Error::Connection(msg) => mentions_timeout(msg),
            _ => false,
        }
    }

    /// Translate into the display form.
    ///
    /// Signals are checked in order and the first match wins:
    ///
    /// 1. a hook deadline
    /// 2. a transport timeout
    /// 3. a `message` field in the response body
    /// 4. this error's own text
    /// 5. [`FALLBACK_MESSAGE`]
    ///
    /// The kind is the status-specific one (401, 403, 404, 422 with field
    /// errors) when the status has one; otherwise `ServerMessage` for step 3
    /// and `Unknown` for steps 4 and 5.
    pub fn normalize(&self) -> NormalizedError {
        if self.is_timeout() {
            return NormalizedError::new(TIMEOUT_MESSAGE, ErrorKind::Timeout);
        }

        let status_kind = self.failure().and_then(ApiFailure::status_kind);

        if let Some(message) = self
            .failure()
            .and_then(|f| f.message.as_deref())
            .filter(|m| !m.trim().is_empty())
        {
            return NormalizedError::new(message, status_kind.unwrap_or(ErrorKind::ServerMessage));
        }

        let kind = status_kind.unwrap_or(ErrorKind::Unknown);
        let raw = self.to_string();
        if raw.trim().is_empty() {
            NormalizedError::new(FALLBACK_MESSAGE, kind)
        } else {
            NormalizedError::new(raw, kind)
        }
    }
}

fn mentions_timeout(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("timeout") || lower.contains("timed out")
}

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A deadline or transport timeout fired
    Timeout,
    /// The session token was missing or rejected
    Unauthorized,
    /// The user lacks permission
    Forbidden,
    /// The resource does not exist
    NotFound,
    /// Structured field errors are present
    Validation,
    /// The body carried a human-readable message
    ServerMessage,
    /// Anything else
    Unknown,
}

/// A failure in display form: one message plus its kind.
///
/// Screens render `message` as-is; `kind` is for tests and conditional UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NormalizedError {
    /// Text to show the user
    pub message: String,
    /// Category of the failure
    pub kind: ErrorKind,
}

impl NormalizedError {
    /// Build a normalized error directly.
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl From<&Error> for NormalizedError {
    fn from(error: &Error) -> Self {
        error.normalize()
    }
}
