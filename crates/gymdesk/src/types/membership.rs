use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Amount, Id};
use super::member::Member;
use super::payment::Payment;

/// Lifecycle state of a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipState {
    /// Currently valid
    Active,
    /// Past its end date
    Expired,
    /// Cancelled before its end date
    Cancelled,
}

/// A membership purchased by a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// Primary key
    pub id: Id,
    /// Owning member
    pub member_id: Id,
    /// Plan name, e.g. "monthly"
    #[serde(rename = "type")]
    pub kind: String,
    /// Length in days
    pub duration: u32,
    /// Price
    pub fee: Amount,
    /// First valid day
    pub start_date: String,
    /// Last valid day
    pub end_date: String,
    /// Current state
    pub status: MembershipState,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Owning member, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Box<Member>>,
    /// Payments made against this membership, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<Payment>>,
}

/// Response of `GET /memberships/status` for the signed-in member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipStatusResponse {
    /// The member
    pub member: Member,
    /// Their active membership, if any
    pub active_membership: Option<Membership>,
    /// Whether `active_membership` is set
    pub has_active_membership: bool,
}

/// Payload for `POST /memberships`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMembership {
    /// Member receiving the membership
    pub member_id: Id,
    /// Plan name
    #[serde(rename = "type")]
    pub kind: String,
    /// Length in days
    pub duration: u32,
    /// Price
    pub fee: f64,
}

/// Payload for `PUT /memberships/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMembership {
    /// New state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MembershipState>,
    /// New end date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}
