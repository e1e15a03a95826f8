//! Members API endpoint

use http::Method;

use super::Resource;
use crate::{
    error::Result,
    http::ApiProvider,
    types::{CreateMember, Id, Member, MessageResponse, UpdateMember},
};

/// Members API resource.
///
/// Listing, creating and deleting members is restricted to admins by the
/// backend; `profile` returns the signed-in member.
#[derive(Clone)]
pub struct Members {
    provider: ApiProvider,
}

impl Members {
    /// Create a new Members resource.
    pub(crate) fn new(provider: ApiProvider) -> Self {
        Self { provider }
    }

    /// List all members.
    pub async fn list(&self) -> Result<Vec<Member>> {
        self.provider
            .request(Method::GET, "/members")
            .send()
            .await?
            .parse_result()
    }

    /// Create a member together with its user account.
    pub async fn create(&self, member: &CreateMember) -> Result<Member> {
        self.provider
            .request(Method::POST, "/members")
            .json(member)?
            .send()
            .await?
            .parse_result()
    }

    /// Get a member by id.
    pub async fn get(&self, id: Id) -> Result<Member> {
        self.provider
            .request(Method::GET, &format!("/members/{id}"))
            .send()
            .await?
            .parse_result()
    }

    /// Update a member.
    pub async fn update(&self, id: Id, changes: &UpdateMember) -> Result<Member> {
        self.provider
            .request(Method::PUT, &format!("/members/{id}"))
            .json(changes)?
            .send()
            .await?
            .parse_result()
    }

    /// Delete a member.
    pub async fn delete(&self, id: Id) -> Result<MessageResponse> {
        self.provider
            .request(Method::DELETE, &format!("/members/{id}"))
            .send()
            .await?
            .parse_result()
    }

    /// The signed-in member's profile.
    pub async fn profile(&self) -> Result<Member> {
        self.provider
            .request(Method::GET, "/members/profile")
            .send()
            .await?
            .parse_result()
    }
}

impl Resource for Members {
    fn provider(&self) -> &ApiProvider {
        &self.provider
    }
}
