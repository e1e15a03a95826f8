//! Memberships API endpoint

use http::Method;

use super::Resource;
use crate::{
    error::Result,
    http::ApiProvider,
    types::{
        CreateMembership, Id, Membership, MembershipStatusResponse, MessageResponse,
        UpdateMembership,
    },
};

/// Memberships API resource.
#[derive(Clone)]
pub struct Memberships {
    provider: ApiProvider,
}

impl Memberships {
    /// Create a new Memberships resource.
    pub(crate) fn new(provider: ApiProvider) -> Self {
        Self { provider }
    }

    /// List all memberships.
    pub async fn list(&self) -> Result<Vec<Membership>> {
        self.provider
            .request(Method::GET, "/memberships")
            .send()
            .await?
            .parse_result()
    }

    /// Create a membership.
    pub async fn create(&self, membership: &CreateMembership) -> Result<Membership> {
        self.provider
            .request(Method::POST, "/memberships")
            .json(membership)?
            .send()
            .await?
            .parse_result()
    }

    /// Get a membership by id.
    pub async fn get(&self, id: Id) -> Result<Membership> {
        self.provider
            .request(Method::GET, &format!("/memberships/{id}"))
            .send()
            .await?
            .parse_result()
    }

    /// Change a membership's status or end date.
    pub async fn update(&self, id: Id, changes: &UpdateMembership) -> Result<Membership> {
        self.provider
            .request(Method::PUT, &format!("/memberships/{id}"))
            .json(changes)?
            .send()
            .await?
            .parse_result()
    }

    /// Delete a membership.
    pub async fn delete(&self, id: Id) -> Result<MessageResponse> {
        self.provider
            .request(Method::DELETE, &format!("/memberships/{id}"))
            .send()
            .await?
            .parse_result()
    }

    /// Membership status of the signed-in member.
    pub async fn status(&self) -> Result<MembershipStatusResponse> {
        self.provider
            .request(Method::GET, "/memberships/status")
            .send()
            .await?
            .parse_result()
    }
}

impl Resource for Memberships {
    fn provider(&self) -> &ApiProvider {
        &self.provider
    }
}
