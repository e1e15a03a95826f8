use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auth::Trainer;
use super::common::Id;
use super::member::Member;

/// A training plan written by a trainer for a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Primary key
    pub id: Id,
    /// Author
    pub trainer_id: Id,
    /// Member the plan is for
    pub member_id: Id,
    /// Plan text
    pub description: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Author, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer: Option<Box<Trainer>>,
    /// Member, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Box<Member>>,
}

/// Payload for `POST /workout-plans`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWorkoutPlan {
    /// Member the plan is for
    pub member_id: Id,
    /// Plan text
    pub description: String,
    /// Author; admins must set it, trainers default to themselves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<Id>,
}

/// Payload for `PUT /workout-plans/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWorkoutPlan {
    /// New plan text
    pub description: String,
}
