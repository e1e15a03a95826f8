//! Attendance API endpoint

use http::Method;

use super::Resource;
use crate::{
    error::Result,
    http::ApiProvider,
    types::{Attendance, CreateAttendance, Id, UpdateAttendance},
};

/// Attendance API resource.
#[derive(Clone)]
pub struct AttendanceRecords {
    provider: ApiProvider,
}

impl AttendanceRecords {
    /// Create a new AttendanceRecords resource.
    pub(crate) fn new(provider: ApiProvider) -> Self {
        Self { provider }
    }

    /// List all attendance records.
    pub async fn list(&self) -> Result<Vec<Attendance>> {
        self.provider
            .request(Method::GET, "/attendance")
            .send()
            .await?
            .parse_result()
    }

    /// Create an attendance record for a member.
    pub async fn create(&self, record: &CreateAttendance) -> Result<Attendance> {
        self.provider
            .request(Method::POST, "/attendance")
            .json(record)?
            .send()
            .await?
            .parse_result()
    }

    /// Update an attendance record, typically to set the check-out time.
    pub async fn update(&self, id: Id, changes: &UpdateAttendance) -> Result<Attendance> {
        self.provider
            .request(Method::PUT, &format!("/attendance/{id}"))
            .json(changes)?
            .send()
            .await?
            .parse_result()
    }

    /// Check the signed-in member in, or out if already checked in today.
    pub async fn mark(&self) -> Result<Attendance> {
        self.provider
            .request(Method::POST, "/attendance/mark")
            .send()
            .await?
            .parse_result()
    }

    /// Attendance records of the signed-in member.
    pub async fn mine(&self) -> Result<Vec<Attendance>> {
        self.provider
            .request(Method::GET, "/attendance/my-attendance")
            .send()
            .await?
            .parse_result()
    }
}

impl Resource for AttendanceRecords {
    fn provider(&self) -> &ApiProvider {
        &self.provider
    }
}
