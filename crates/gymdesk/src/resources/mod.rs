//! API resource endpoints
//!
//! One resource per backend collection. Every call goes through the shared
//! [`ApiProvider`](crate::http::ApiProvider), so reads are cached and a `401`
//! from any of them ends the session.
//!
//! Resources never invalidate the cache; callers do that after writes with
//! [`Client::invalidate`](crate::Client::invalidate).

pub mod attendance;
pub mod auth;
pub mod members;
pub mod memberships;
pub mod payments;
pub mod workout_plans;

pub use attendance::AttendanceRecords;
pub use auth::Auth;
pub use members::Members;
pub use memberships::Memberships;
pub use payments::Payments;
pub use workout_plans::WorkoutPlans;

use crate::http::ApiProvider;

/// Base trait for API resources.
///
/// Resources hold the provider, never the [`Client`](crate::Client), so
/// they do not keep the client alive.
pub trait Resource {
    /// Get a reference to the provider requests go through.
    fn provider(&self) -> &ApiProvider;
}
