//! Configuration for the gymdesk client

use http::HeaderMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Environment variable overriding the base address.
pub const BASE_URL_ENV: &str = "GYMDESK_API_URL";

/// Environment variable selecting a file for persisted session storage.
pub const SESSION_FILE_ENV: &str = "GYMDESK_SESSION_FILE";

/// Configuration for the gymdesk client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the REST API; [`DEFAULT_BASE_URL`] when unset
    pub base_url: Option<String>,

    /// Bound on a single request
    pub timeout: Duration,

    /// Extra headers sent with every request, on top of the JSON defaults
    pub default_headers: HeaderMap,

    /// File backing the persisted session; in-memory when unset
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            default_headers: HeaderMap::new(),
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    /// This will look for:
    /// - `GYMDESK_API_URL` for the API base address
    /// - `GYMDESK_SESSION_FILE` for file-backed session storage
    #[cfg(feature = "env")]
    pub fn from_env() -> Self {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(base_url) = env::var(BASE_URL_ENV)
            && !base_url.trim().is_empty()
        {
            config.base_url = Some(base_url);
        }

        if let Ok(path) = env::var(SESSION_FILE_ENV)
            && !path.trim().is_empty()
        {
            config.session_file = Some(PathBuf::from(path));
        }

        config
    }

    /// The base address to use, falling back to [`DEFAULT_BASE_URL`].
    pub fn resolved_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Merge this configuration with another, with the other taking precedence.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout != DEFAULT_TIMEOUT {
            self.timeout = other.timeout;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }
        if other.session_file.is_some() {
            self.session_file = other.session_file;
        }

        self
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> crate::Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Persist the session in `path`.
    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.session_file = Some(path.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.resolved_base_url(), "http://localhost:8000/api");
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfigBuilder::new()
            .base_url("https://gym.example.com/api")
            .timeout(Duration::from_secs(3))
            .default_header("x-client", "desk")
            .unwrap()
            .session_file("/tmp/gymdesk-session.json")
            .build();

        assert_eq!(config.resolved_base_url(), "https://gym.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.default_headers["x-client"], "desk");
        assert!(config.session_file.is_some());
    }

    #[test]
    fn test_invalid_default_header() {
        let err = ClientConfigBuilder::new()
            .default_header("bad header", "v")
            .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidHeaderName(_)));
    }

    #[test]
    fn test_config_merge() {
        let base = ClientConfig::with_base_url("http://a/api");
        let other = ClientConfigBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();

        let merged = base.merge(other);
        assert_eq!(merged.base_url.as_deref(), Some("http://a/api"));
        assert_eq!(merged.timeout, Duration::from_secs(30));
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env_overrides_base_url() {
        temp_env::with_vars(
            [
                (BASE_URL_ENV, Some("http://gym.internal:9000/api")),
                (SESSION_FILE_ENV, None),
            ],
            || {
                let config = ClientConfig::from_env();
                assert_eq!(config.resolved_base_url(), "http://gym.internal:9000/api");
                assert!(config.session_file.is_none());
            },
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env_ignores_blank_values() {
        temp_env::with_vars(
            [(BASE_URL_ENV, Some("  ")), (SESSION_FILE_ENV, Some("/tmp/s.json"))],
            || {
                let config = ClientConfig::from_env();
                assert_eq!(config.resolved_base_url(), DEFAULT_BASE_URL);
                assert_eq!(config.session_file, Some(PathBuf::from("/tmp/s.json")));
            },
        );
    }
}
