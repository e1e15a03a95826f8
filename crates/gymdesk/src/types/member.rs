use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::attendance::Attendance;
use super::auth::User;
use super::common::Id;
use super::membership::Membership;
use super::payment::Payment;
use super::workout_plan::WorkoutPlan;

/// Gender as recorded on a member profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other / unspecified
    Other,
}

/// A gym member profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Primary key
    pub id: Id,
    /// Owning account
    pub user_id: Id,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Phone number
    pub phone: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Owning account, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<User>>,
    /// Membership history, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memberships: Option<Vec<Membership>>,
    /// Assigned workout plans, when embedded
    #[serde(
        rename = "workoutPlans",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub workout_plans: Option<Vec<WorkoutPlan>>,
    /// Payments, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<Payment>>,
    /// Attendance records, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendances: Option<Vec<Attendance>>,
    /// The currently active membership, when embedded
    #[serde(
        rename = "activeMembership",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub active_membership: Option<Box<Membership>>,
}

/// Payload for `POST /members`; creates the account and the profile together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct CreateMember {
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Initial password
    pub password: String,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Phone number
    pub phone: String,
}

impl CreateMember {
    /// Start building a member payload.
    pub fn builder() -> CreateMemberBuilder {
        CreateMemberBuilder::default()
    }
}

/// Payload for `PUT /members/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMember {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Gender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Login name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
