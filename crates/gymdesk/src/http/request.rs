//! HTTP request builder

use super::{ApiProvider, Response};
use crate::error::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;

/// Builder for API requests.
///
/// The path is relative to the client's base address and, query string
/// included, doubles as the cache key for GET requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    pub(crate) provider: Option<ApiProvider>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Self {
            method,
            path,
            headers: HeaderMap::new(),
            body: None,
            provider: None,
        }
    }

    /// Set the provider that will execute this request.
    pub(crate) fn with_provider(mut self, provider: ApiProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set a header.
    ///
    /// # Errors
    /// Returns an error if the header name or value contains invalid characters.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.headers.insert(key, value);
        Ok(self)
    }

    /// Append query parameters to the path.
    pub fn query<K, V>(mut self, params: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if params.is_empty() {
            return self;
        }

        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
            .finish();

        let separator = if self.path.contains('?') { '&' } else { '?' };
        self.path.push(separator);
        self.path.push_str(&encoded);
        self
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    /// Returns an error if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    /// Set the raw request body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Send the request and get a response.
    pub async fn send(self) -> Result<Response> {
        let provider = self
            .provider
            .clone()
            .ok_or_else(|| Error::InvalidRequest("No provider configured".to_string()))?;
        provider.execute(self).await
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the path, query string included.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the body.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub(crate) fn into_parts(self) -> (Method, String, HeaderMap, Option<Vec<u8>>) {
        (self.method, self.path, self.headers, self.body)
    }
}
