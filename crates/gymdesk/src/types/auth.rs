use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::common::Id;
use super::member::{Gender, Member};
use super::workout_plan::WorkoutPlan;

/// Account role, which decides the dashboard a user lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access
    Admin,
    /// Manages workout plans
    Trainer,
    /// Gym member
    Member,
}

/// A login account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: Id,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Account role
    pub role: Role,
    /// When the email was verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Member profile, for member accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Box<Member>>,
    /// Trainer profile, for trainer accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer: Option<Box<Trainer>>,
}

/// Trainer profile attached to a trainer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    /// Primary key
    pub id: Id,
    /// Owning account
    pub user_id: Id,
    /// Area of expertise
    pub specialization: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Owning account, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<User>>,
    /// Plans written by this trainer, when embedded
    #[serde(
        rename = "workoutPlans",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub workout_plans: Option<Vec<WorkoutPlan>>,
}

/// Token and account returned by login and registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The account
    pub user: User,
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Credentials for `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plain-text password
    pub password: String,
}

impl LoginRequest {
    /// Create login credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Payload for `POST /api/register`.
///
/// Member-profile fields apply to the `member` role and `specialization`
/// to the `trainer` role.
///
/// ```rust
/// use gymdesk::types::{RegisterRequest, Role};
///
/// let request = RegisterRequest::builder()
///     .username("alice")
///     .email("alice@example.com")
///     .password("secret123")
///     .role(Role::Member)
///     .name("Alice")
///     .age(29u32)
///     .build()
///     .unwrap();
/// assert_eq!(request.phone, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into, strip_option))]
pub struct RegisterRequest {
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Account role
    pub role: Role,
    /// Member display name
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Member age
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Member gender
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Member phone number
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Trainer specialization
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

impl RegisterRequest {
    /// Start building a registration payload.
    pub fn builder() -> RegisterRequestBuilder {
        RegisterRequestBuilder::default()
    }
}
