//! HTTP pipeline of the client
//!
//! Requests are built with [`RequestBuilder`], pass through the
//! [`ApiProvider`] (cache consult, middleware, transport) and come back as a
//! [`Response`] or a raw [`Error`](crate::Error).

pub use middleware::{AuthMiddleware, Middleware, MiddlewareStack, SessionExpiryMiddleware, TracingMiddleware};
pub use provider::{ApiProvider, ApiProviderBuilder, SharedCache};
pub use request::RequestBuilder;
pub use response::Response;

pub mod middleware;
mod provider;
mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
