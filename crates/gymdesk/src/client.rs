//! Main client implementation for the gymdesk API

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use gymdesk_transport::Transport;
use http::Method;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    http::{ApiProvider, RequestBuilder, SharedCache},
    resources::{AttendanceRecords, Auth, Members, Memberships, Payments, WorkoutPlans},
    session::{FileStorage, Navigator, Session, SessionStorage},
};

/// Main client for the gym-management API.
///
/// Every resource shares one [`ApiProvider`], so they share the response
/// cache, the session and the transport. Cloning the client is cheap.
///
/// # Example
///
/// ```rust,no_run
/// use gymdesk::Client;
///
/// # async fn example() -> gymdesk::Result<()> {
/// let client = Client::builder()
///     .base_url("http://localhost:8000/api")
///     .build()?;
///
/// let members = client.members().list().await?;
/// println!("{} members", members.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    provider: ApiProvider,

    members: OnceLock<Members>,
    memberships: OnceLock<Memberships>,
    payments: OnceLock<Payments>,
    attendance: OnceLock<AttendanceRecords>,
    workout_plans: OnceLock<WorkoutPlans>,
    auth: OnceLock<Auth>,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client around an already built provider.
    pub fn from_provider(provider: ApiProvider) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                provider,
                members: OnceLock::new(),
                memberships: OnceLock::new(),
                payments: OnceLock::new(),
                attendance: OnceLock::new(),
                workout_plans: OnceLock::new(),
                auth: OnceLock::new(),
            }),
        }
    }

    /// Create a client from a configuration object.
    ///
    /// A configured session file is opened as persisted session storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the base address is invalid or the session file
    /// exists but cannot be read.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a client configured from the environment.
    ///
    /// See [`ClientConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Same as [`Client::from_config`].
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env())
    }

    /// Access the member endpoints.
    pub fn members(&self) -> &Members {
        self.inner.members.get_or_init(|| Members::new(self.inner.provider.clone()))
    }

    /// Access the membership endpoints.
    pub fn memberships(&self) -> &Memberships {
        self.inner
            .memberships
            .get_or_init(|| Memberships::new(self.inner.provider.clone()))
    }

    /// Access the payment endpoints.
    pub fn payments(&self) -> &Payments {
        self.inner.payments.get_or_init(|| Payments::new(self.inner.provider.clone()))
    }

    /// Access the attendance endpoints.
    pub fn attendance(&self) -> &AttendanceRecords {
        self.inner
            .attendance
            .get_or_init(|| AttendanceRecords::new(self.inner.provider.clone()))
    }

    /// Access the workout plan endpoints.
    pub fn workout_plans(&self) -> &WorkoutPlans {
        self.inner
            .workout_plans
            .get_or_init(|| WorkoutPlans::new(self.inner.provider.clone()))
    }

    /// Access registration, login and logout.
    pub fn auth(&self) -> &Auth {
        self.inner.auth.get_or_init(|| Auth::new(self.inner.provider.clone()))
    }

    /// Create a request builder for a path not covered by a resource.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner.provider.request(method, path)
    }

    /// The shared response cache.
    pub fn cache(&self) -> &SharedCache {
        self.inner.provider.cache()
    }

    /// The session holding the bearer token.
    pub fn session(&self) -> &Session {
        self.inner.provider.session()
    }

    /// Drop cached reads whose key contains `pattern`, or all of them.
    ///
    /// Nothing invalidates the cache automatically; call this after writes
    /// whose effect should be visible within the cache lifetime.
    pub fn invalidate(&self, pattern: Option<&str>) -> usize {
        self.cache().invalidate(pattern)
    }

    /// Get the base URL of the API.
    pub fn base_url(&self) -> &str {
        self.inner.provider.base_url()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("provider", &self.inner.provider)
            .finish_non_exhaustive()
    }
}

/// Builder for creating a configured [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    storage: Option<Arc<dyn SessionStorage>>,
    navigator: Option<Arc<dyn Navigator>>,
    cache: Option<SharedCache>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Start from `config`, keeping anything set on the builder so far
    /// unless `config` overrides it.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = self.config.merge(config);
        self
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Keep the session in `storage`. Takes precedence over a session file.
    pub fn session_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Route session-expiry redirects through `navigator`.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Share `cache` with other clients.
    pub fn cache(mut self, cache: SharedCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Send requests through `transport` instead of the reqwest one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client with the configured options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base address is invalid, the HTTP client
    /// cannot be created, or the session file cannot be read.
    pub fn build(self) -> Result<Client> {
        let storage: Arc<dyn SessionStorage> = match (self.storage, &self.config.session_file) {
            (Some(storage), _) => storage,
            (None, Some(path)) => Arc::new(FileStorage::open(path)?),
            (None, None) => Arc::new(crate::session::MemoryStorage::new()),
        };

        let mut provider = ApiProvider::builder()
            .base_url(self.config.resolved_base_url())
            .timeout(self.config.timeout)
            .default_headers(self.config.default_headers)
            .session(Session::new(storage));

        if let Some(navigator) = self.navigator {
            provider = provider.navigator(navigator);
        }
        if let Some(cache) = self.cache {
            provider = provider.cache(cache);
        }
        if let Some(transport) = self.transport {
            provider = provider.transport(transport);
        }

        Ok(Client::from_provider(provider.build()?))
    }
}
