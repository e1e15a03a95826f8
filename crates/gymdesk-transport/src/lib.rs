//! HTTP transport layer for gymdesk
//!
//! The lowest layer of the client: it moves bytes to and from the REST
//! backend and nothing else. It knows nothing about caching, sessions or
//! error bodies; those live in the `gymdesk` crate, which talks to this
//! layer only through the [`Transport`] trait.
//!
//! # Architecture
//!
//! - **Transport trait**: the seam the client is built against
//! - **HTTP transport**: reqwest-backed implementation with a fixed
//!   per-request timeout and no retries
//! - **Error handling**: [`TransportError`] reports raw failures unmodified

#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! # Usage
//!
//! ```ignore
//! use gymdesk_transport::{HttpRequest, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::get("http://localhost:8000/api/members");
//! let response = transport.send_http(request).await?;
//! ```

pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use traits::{HttpRequest, HttpResponse, Transport};
