//! Request lifecycle hooks
//!
//! A hook owns the loading/error/data state of one screen-level operation:
//!
//! - [`FetchHook`] drives a read. It races the producer against
//!   [`DEFAULT_FETCH_TIMEOUT`](crate::DEFAULT_FETCH_TIMEOUT), keeps the last
//!   good data on failure, and drops results that arrive after a newer call
//!   or after teardown.
//! - [`MutationHook`] drives a write. It records the normalized error and
//!   hands the original one back to the caller.
//!
//! State is published through a [`tokio::sync::watch`] channel, so a UI can
//! `subscribe()` and redraw on change, and tests can read a `snapshot()`.
//!
//! ```rust,no_run
//! use gymdesk::{Client, hooks::FetchHook};
//!
//! # async fn example() -> gymdesk::Result<()> {
//! let client = Client::builder().build()?;
//! let members = FetchHook::new({
//!     let client = client.clone();
//!     move || {
//!         let client = client.clone();
//!         async move { client.members().list().await }
//!     }
//! });
//!
//! members.activate().await;
//! if let Some(error) = members.snapshot().error {
//!     eprintln!("{error}");
//! }
//! # Ok(())
//! # }
//! ```

mod fetch;
mod mutation;
mod state;

pub use fetch::{FetchHook, FetchHookBuilder};
pub use mutation::{MutationHook, MutationHookBuilder};
pub use state::{FetchState, Phase, RequestOutcome};

pub use gymdesk_core::lifecycle::Liveness;
