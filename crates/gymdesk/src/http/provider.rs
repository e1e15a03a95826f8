//! The request pipeline between the typed client and the transport.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use gymdesk_core::cache::ResponseCache;
use gymdesk_transport::{HttpRequest, HttpTransport, HttpTransportConfig, Transport};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};

use super::middleware::{
    AuthMiddleware, Middleware, MiddlewareStack, SessionExpiryMiddleware, TracingMiddleware,
};
use super::{RequestBuilder, Response};
use crate::error::{Error, Result};
use crate::observability::{
    RequestMetadata, RequestTimer, ResponseMetadata, log_failure, log_transport_failure,
};
use crate::session::{Navigator, Session, TracingNavigator};
use crate::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// The response cache shared by every request of a client.
pub type SharedCache = Arc<ResponseCache<Bytes>>;

/// Executes requests against the gymdesk API.
///
/// For each request the provider:
///
/// - answers GETs from the cache while the entry is fresh
/// - otherwise adds the JSON headers, runs the middleware and dispatches
///   exactly once through the transport
/// - stores the body of every `200` GET in the cache
/// - turns error statuses into [`Error`] without retrying
///
/// Cloning is cheap; clones share the cache, session and transport.
#[derive(Clone)]
pub struct ApiProvider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    base_url: String,
    default_headers: HeaderMap,
    transport: Arc<dyn Transport>,
    cache: SharedCache,
    session: Session,
    middleware: MiddlewareStack,
}

impl ApiProvider {
    /// Create a new provider builder.
    pub fn builder() -> ApiProviderBuilder {
        ApiProviderBuilder::default()
    }

    /// The base address requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The shared response cache.
    pub fn cache(&self) -> &SharedCache {
        &self.inner.cache
    }

    /// The session the bearer token is read from.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Start a request bound to this provider.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        RequestBuilder::new(method, path).with_provider(self.clone())
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Run one request through the pipeline.
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let (method, path, headers, body) = request.into_parts();

        let mut metadata = RequestMetadata::new(method.as_str(), path.as_str());
        if let Some(body) = &body {
            metadata = metadata.with_body_size(body.len());
        }

        let is_get = method == Method::GET;
        if is_get && let Some(cached) = self.inner.cache.get(&path) {
            metadata.log_cache_hit();
            // A replayed 200 is stored again, so steady reads keep the entry warm.
            self.inner.cache.set(path, cached.clone());
            return Ok(Response::cached(cached));
        }

        let mut outgoing = HttpRequest::new(method, self.url_for(&path));
        outgoing.headers = self.inner.default_headers.clone();
        outgoing.headers.extend(headers);
        outgoing.body = body;

        let outgoing = self.inner.middleware.process_request(outgoing).await?;

        metadata.log_request();
        let timer = RequestTimer::start();

        let raw = match self.inner.transport.send_http(outgoing).await {
            Ok(raw) => raw,
            Err(e) => {
                let err = Error::from(e);
                log_transport_failure(&metadata, &err, timer.elapsed());
                return Err(err);
            }
        };

        let elapsed = timer.elapsed();
        let response = Response::from_transport(raw, elapsed)?;
        let response = self.inner.middleware.process_response(response).await?;

        let response_metadata =
            ResponseMetadata::new(response.status().as_u16(), elapsed).with_body_size(response.body().len());

        if response.is_error() {
            let err = Error::from_response(response.status().as_u16(), &response.text());
            response_metadata.log_error(&metadata, &err.to_string());
            if let Some(failure) = err.failure() {
                log_failure(&metadata, failure);
            }
            return Err(err);
        }

        response_metadata.log_success(&metadata);

        if is_get && response.status() == StatusCode::OK {
            self.inner.cache.set(path, response.body().clone());
        }

        Ok(response)
    }
}

impl fmt::Debug for ApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiProvider")
            .field("base_url", &self.inner.base_url)
            .field("transport", &self.inner.transport)
            .field("cache", &self.inner.cache)
            .field("middleware", &self.inner.middleware)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiProvider`].
#[derive(Default)]
pub struct ApiProviderBuilder {
    base_url: Option<String>,
    timeout: Option<std::time::Duration>,
    default_headers: HeaderMap,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<SharedCache>,
    session: Option<Session>,
    navigator: Option<Arc<dyn Navigator>>,
    extra_middleware: Vec<Box<dyn Middleware>>,
}

impl ApiProviderBuilder {
    /// Set the base address.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the per-request timeout of the default transport.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add headers sent with every request.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers.extend(headers);
        self
    }

    /// Use a custom transport instead of the reqwest one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Share an existing response cache.
    pub fn cache(mut self, cache: SharedCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Read and clear credentials in `session`.
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Navigate with `navigator` when the session expires.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Append a middleware after the built-in ones.
    pub fn middleware(mut self, middleware: Box<dyn Middleware>) -> Self {
        self.extra_middleware.push(middleware);
        self
    }

    /// Build the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the base address is not an absolute URL or the
    /// default transport cannot be created.
    pub fn build(self) -> Result<ApiProvider> {
        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = url::Url::parse(&base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(Error::InvalidUrl(base_url));
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::with_config(HttpTransportConfig {
                timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
                ..Default::default()
            })?),
        };

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.extend(self.default_headers);

        let session = self.session.unwrap_or_else(Session::in_memory);
        let navigator = self.navigator.unwrap_or_else(|| Arc::new(TracingNavigator));

        let mut middleware = MiddlewareStack::new();
        middleware.push(Box::new(TracingMiddleware));
        middleware.push(Box::new(AuthMiddleware::new(session.clone())));
        middleware.push(Box::new(SessionExpiryMiddleware::new(session.clone(), navigator)));
        for extra in self.extra_middleware {
            middleware.push(extra);
        }

        Ok(ApiProvider {
            inner: Arc::new(ProviderInner {
                base_url,
                default_headers,
                transport,
                cache: self.cache.unwrap_or_default(),
                session,
                middleware,
            }),
        })
    }
}
