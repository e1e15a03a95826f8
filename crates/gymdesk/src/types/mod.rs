//! Request and response types for the gymdesk REST API
//!
//! Field names follow the backend's JSON exactly (snake_case, with the
//! handful of camelCase relation names it emits). Relations are optional
//! because the backend only embeds them on some endpoints.

mod attendance;
mod auth;
mod common;
mod member;
mod membership;
mod payment;
mod workout_plan;

pub use attendance::{Attendance, CreateAttendance, UpdateAttendance};
pub use auth::{
    AuthResponse, LoginRequest, RegisterRequest, RegisterRequestBuilder, Role, Trainer, User,
};
pub use common::{Amount, Id, MessageResponse};
pub use member::{CreateMember, CreateMemberBuilder, Gender, Member, UpdateMember};
pub use membership::{
    CreateMembership, Membership, MembershipState, MembershipStatusResponse, UpdateMembership,
};
pub use payment::{CreatePayment, Payment, Receipt};
pub use workout_plan::{CreateWorkoutPlan, UpdateWorkoutPlan, WorkoutPlan};
