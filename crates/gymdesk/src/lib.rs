//! # gymdesk
//!
//! Async client for the gymdesk gym-management REST API:
//! - Typed resources for members, memberships, payments, attendance and
//!   workout plans
//! - Bearer-token sessions persisted across restarts
//! - A 30 second response cache for GET requests
//! - Fetch and mutation hooks with deadline racing and stale-result
//!   suppression
//! - One normalized error shape for display
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gymdesk::{Client, LoginRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_env()?;
//!
//!     client
//!         .auth()
//!         .login(&LoginRequest::new("admin@gym.test", "password"))
//!         .await?;
//!
//!     for member in client.members().list().await? {
//!         println!("{} ({})", member.name, member.phone);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::time::Duration;

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ApiFailure, Error, ErrorKind, NormalizedError, Result};
pub use gymdesk_core::cache::DEFAULT_TTL as CACHE_TTL;
pub use hooks::{FetchHook, FetchState, MutationHook, Phase, RequestOutcome};
pub use crate::http::{Response, SharedCache};
pub use session::{FileStorage, MemoryStorage, Navigator, Session, SessionStorage};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
pub mod http;
pub mod observability;
pub mod resources;
pub mod session;
pub mod types;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use gymdesk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Client, ClientConfig, Error, ErrorKind, NormalizedError, Result,
        hooks::{FetchHook, FetchState, Liveness, MutationHook, Phase},
        session::{Navigator, Session},
        types::{Id, LoginRequest, Member, Membership, Payment, Role, User, WorkoutPlan},
    };
}

/// SDK version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Bound on a single HTTP request
pub const DEFAULT_TIMEOUT: Duration = gymdesk_transport::http::DEFAULT_TIMEOUT;

/// Bound on a whole fetch-hook call, enforced independently of [`DEFAULT_TIMEOUT`]
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);
