//! Authentication endpoints
//!
//! These live under `/api/...` relative to the base address, so with the
//! default base they resolve to `http://localhost:8000/api/api/login` and
//! friends. That is the path shape the backend serves.

use http::Method;

use super::Resource;
use crate::{
    error::Result,
    http::ApiProvider,
    types::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest, User},
};

/// Authentication resource.
///
/// Successful `register` and `login` calls persist the returned token and
/// user in the client's session; `logout` always clears it.
#[derive(Clone)]
pub struct Auth {
    provider: ApiProvider,
}

impl Auth {
    /// Create a new Auth resource.
    pub(crate) fn new(provider: ApiProvider) -> Self {
        Self { provider }
    }

    /// Create an account and sign in with it.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let auth: AuthResponse = self
            .provider
            .request(Method::POST, "/api/register")
            .json(request)?
            .send()
            .await?
            .parse_result()?;

        self.provider.session().store(&auth)?;
        Ok(auth)
    }

    /// Sign in with email and password.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let auth: AuthResponse = self
            .provider
            .request(Method::POST, "/api/login")
            .json(request)?
            .send()
            .await?
            .parse_result()?;

        self.provider.session().store(&auth)?;
        Ok(auth)
    }

    /// Revoke the token on the server and forget it locally.
    ///
    /// The local session is cleared even when the server call fails; the
    /// server's error is still returned.
    pub async fn logout(&self) -> Result<MessageResponse> {
        let result = self
            .provider
            .request(Method::POST, "/api/logout")
            .send()
            .await
            .and_then(|response| response.parse_result());

        self.provider.session().clear()?;
        result
    }

    /// The signed-in user.
    pub async fn me(&self) -> Result<User> {
        self.provider
            .request(Method::GET, "/api/user")
            .send()
            .await?
            .parse_result()
    }
}

impl Resource for Auth {
    fn provider(&self) -> &ApiProvider {
        &self.provider
    }
}
