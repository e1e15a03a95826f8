//! Workout plans API endpoint

use http::Method;

use super::Resource;
use crate::{
    error::Result,
    http::ApiProvider,
    types::{CreateWorkoutPlan, Id, MessageResponse, UpdateWorkoutPlan, WorkoutPlan},
};

/// Workout plans API resource.
///
/// For trainers the backend filters `list` down to their own plans.
#[derive(Clone)]
pub struct WorkoutPlans {
    provider: ApiProvider,
}

impl WorkoutPlans {
    /// Create a new WorkoutPlans resource.
    pub(crate) fn new(provider: ApiProvider) -> Self {
        Self { provider }
    }

    /// List workout plans.
    pub async fn list(&self) -> Result<Vec<WorkoutPlan>> {
        self.provider
            .request(Method::GET, "/workout-plans")
            .send()
            .await?
            .parse_result()
    }

    /// Create a workout plan.
    pub async fn create(&self, plan: &CreateWorkoutPlan) -> Result<WorkoutPlan> {
        self.provider
            .request(Method::POST, "/workout-plans")
            .json(plan)?
            .send()
            .await?
            .parse_result()
    }

    /// Get a workout plan by id.
    pub async fn get(&self, id: Id) -> Result<WorkoutPlan> {
        self.provider
            .request(Method::GET, &format!("/workout-plans/{id}"))
            .send()
            .await?
            .parse_result()
    }

    /// Replace a plan's description.
    pub async fn update(&self, id: Id, changes: &UpdateWorkoutPlan) -> Result<WorkoutPlan> {
        self.provider
            .request(Method::PUT, &format!("/workout-plans/{id}"))
            .json(changes)?
            .send()
            .await?
            .parse_result()
    }

    /// Delete a workout plan.
    pub async fn delete(&self, id: Id) -> Result<MessageResponse> {
        self.provider
            .request(Method::DELETE, &format!("/workout-plans/{id}"))
            .send()
            .await?
            .parse_result()
    }

    /// Workout plans of the signed-in member.
    pub async fn mine(&self) -> Result<Vec<WorkoutPlan>> {
        self.provider
            .request(Method::GET, "/workout-plans/my-plans")
            .send()
            .await?
            .parse_result()
    }
}

impl Resource for WorkoutPlans {
    fn provider(&self) -> &ApiProvider {
        &self.provider
    }
}
