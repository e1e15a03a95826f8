//! HTTP transport implementation
//!
//! Provides the reqwest-backed client that implements the Transport trait.

pub mod client;

pub use client::{DEFAULT_TIMEOUT, HttpTransport, HttpTransportConfig};
