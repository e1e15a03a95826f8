//! Error conversion at crate boundaries.

mod boundary;

pub use boundary::ErrorBoundary;
