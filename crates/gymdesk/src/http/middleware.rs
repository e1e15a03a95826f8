//! HTTP middleware for request/response processing
//!
//! Middleware sees every request that reaches the network (cache hits never
//! do) and every response that comes back, before it is turned into a
//! result.

use super::Response;
use crate::error::Result;
use crate::session::{LOGIN_ROUTE, Navigator, Session};
use async_trait::async_trait;
use gymdesk_transport::HttpRequest;
use http::header::AUTHORIZATION;
use http::{HeaderValue, StatusCode};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Trait for HTTP middleware.
#[async_trait]
pub trait Middleware: Send + Sync + std::fmt::Debug {
    /// Process a request before sending.
    async fn process_request(&self, request: HttpRequest) -> Result<HttpRequest> {
        Ok(request)
    }

    /// Process a response after receiving.
    async fn process_response(&self, response: Response) -> Result<Response> {
        Ok(response)
    }
}

/// Middleware that adds logging/tracing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

#[async_trait]
impl Middleware for TracingMiddleware {
    async fn process_request(&self, request: HttpRequest) -> Result<HttpRequest> {
        tracing::trace!("Dispatching {} request to {}", request.method, request.url);
        Ok(request)
    }

    async fn process_response(&self, response: Response) -> Result<Response> {
        tracing::trace!("Received response with status: {}", response.status());
        Ok(response)
    }
}

/// Middleware that attaches the stored bearer token.
///
/// Requests go out without an `Authorization` header when no token is stored.
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    session: Session,
}

impl AuthMiddleware {
    /// Read tokens from `session`.
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    async fn process_request(&self, mut request: HttpRequest) -> Result<HttpRequest> {
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| crate::Error::InvalidHeaderValue("<redacted bearer token>".into()))?;
            request.headers.insert(AUTHORIZATION, value);
        }
        Ok(request)
    }
}

/// Middleware that ends the session when the server rejects the token.
///
/// On every `401` it clears the stored credentials and navigates to
/// [`LOGIN_ROUTE`], once per response. The response itself is passed on
/// untouched so the caller still sees the failure.
#[derive(Debug, Clone)]
pub struct SessionExpiryMiddleware {
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl SessionExpiryMiddleware {
    /// Clear `session` and redirect through `navigator` on `401`.
    pub fn new(session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }
}

#[async_trait]
impl Middleware for SessionExpiryMiddleware {
    async fn process_response(&self, response: Response) -> Result<Response> {
        if response.status() == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.session.clear() {
                tracing::error!(error = %e, "Failed to clear session after 401");
            }
            self.navigator.navigate(LOGIN_ROUTE);
        }
        Ok(response)
    }
}

/// Composite middleware that chains multiple middleware.
#[derive(Debug, Default)]
pub struct MiddlewareStack {
    middlewares: Vec<Box<dyn Middleware>>,
}

impl MiddlewareStack {
    /// Create a new middleware stack.
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the stack.
    pub fn push(&mut self, middleware: Box<dyn Middleware>) {
        self.middlewares.push(middleware);
    }

    /// Number of middleware in the stack.
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}

#[async_trait]
impl Middleware for MiddlewareStack {
    async fn process_request(&self, mut request: HttpRequest) -> Result<HttpRequest> {
        for middleware in &self.middlewares {
            request = middleware.process_request(request).await?;
        }
        Ok(request)
    }

    async fn process_response(&self, mut response: Response) -> Result<Response> {
        // Process in reverse order for responses
        for middleware in self.middlewares.iter().rev() {
            response = middleware.process_response(response).await?;
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: &str) {
            self.routes.lock().unwrap().push(route.to_string());
        }
    }

    fn response(status: StatusCode) -> Response {
        Response::new(status, HeaderMap::new(), "{}")
    }

    #[tokio::test]
    async fn test_auth_middleware_attaches_token() {
        let session = Session::in_memory();
        session.set_token("1|secret").unwrap();

        let request = AuthMiddleware::new(session)
            .process_request(HttpRequest::get("http://localhost:8000/api/members"))
            .await
            .unwrap();

        assert_eq!(request.header("authorization"), Some("Bearer 1|secret"));
    }

    #[tokio::test]
    async fn test_auth_middleware_omits_header_without_token() {
        let request = AuthMiddleware::new(Session::in_memory())
            .process_request(HttpRequest::get("http://localhost:8000/api/members"))
            .await
            .unwrap();

        assert_eq!(request.header("authorization"), None);
    }

    #[tokio::test]
    async fn test_session_expiry_on_401() {
        let session = Session::in_memory();
        session.set_token("1|stale").unwrap();
        let navigator = Arc::new(RecordingNavigator::default());
        let middleware = SessionExpiryMiddleware::new(session.clone(), navigator.clone());

        let passed = middleware
            .process_response(response(StatusCode::UNAUTHORIZED))
            .await
            .unwrap();

        assert_eq!(passed.status(), StatusCode::UNAUTHORIZED);
        assert!(session.token().is_none());
        assert_eq!(*navigator.routes.lock().unwrap(), vec![LOGIN_ROUTE.to_string()]);
    }

    #[tokio::test]
    async fn test_session_expiry_ignores_other_statuses() {
        let session = Session::in_memory();
        session.set_token("1|fresh").unwrap();
        let navigator = Arc::new(RecordingNavigator::default());
        let middleware = SessionExpiryMiddleware::new(session.clone(), navigator.clone());

        for status in [StatusCode::OK, StatusCode::FORBIDDEN, StatusCode::NOT_FOUND] {
            middleware.process_response(response(status)).await.unwrap();
        }

        assert!(session.is_authenticated());
        assert!(navigator.routes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_middleware_stack_runs_in_order() {
        let session = Session::in_memory();
        session.set_token("1|abc").unwrap();

        let mut stack = MiddlewareStack::new();
        assert!(stack.is_empty());
        stack.push(Box::new(TracingMiddleware));
        stack.push(Box::new(AuthMiddleware::new(session.clone())));
        assert_eq!(stack.len(), 2);

        let request = stack
            .process_request(HttpRequest::get("http://localhost:8000/api/user"))
            .await
            .unwrap();
        assert_eq!(request.header("authorization"), Some("Bearer 1|abc"));
    }
}
