use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Id;
use super::member::Member;

/// One day's check-in record for a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    /// Primary key
    pub id: Id,
    /// Member checked in
    pub member_id: Id,
    /// Day of the visit
    pub date: String,
    /// Check-in time
    pub check_in: String,
    /// Check-out time, once recorded
    #[serde(default)]
    pub check_out: Option<String>,
    /// Attendance status, e.g. "present"
    pub status: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Member, when embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Box<Member>>,
}

/// Payload for `POST /attendance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAttendance {
    /// Member checked in
    pub member_id: Id,
    /// Day of the visit; the server uses today when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Check-in time; the server uses now when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    /// Attendance status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Payload for `PUT /attendance/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAttendance {
    /// Check-out time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    /// Attendance status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
