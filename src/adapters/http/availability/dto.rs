//! JSON request/response types for availability endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::appointment::BookingError;
use crate::domain::availability::{
    Availability, DayOfWeek, ScheduleException, TimeOfDay, WorkingHours,
};

/// One weekly-template entry on the wire. Days are 0 (Sunday) through 6,
/// times are `HH:MM` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHoursDto {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub is_working: bool,
}

impl WorkingHoursDto {
    pub fn into_domain(self) -> Result<WorkingHours, BookingError> {
        Ok(WorkingHours {
            day_of_week: DayOfWeek::new(self.day_of_week)?,
            start_time: TimeOfDay::parse(&self.start_time)?,
            end_time: TimeOfDay::parse(&self.end_time)?,
            is_working: self.is_working,
        })
    }
}

impl From<&WorkingHours> for WorkingHoursDto {
    fn from(hours: &WorkingHours) -> Self {
        Self {
            day_of_week: hours.day_of_week.as_u8(),
            start_time: hours.start_time.to_string(),
            end_time: hours.end_time.to_string(),
            is_working: hours.is_working,
        }
    }
}

/// A date-specific override on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleExceptionDto {
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub is_available: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ScheduleExceptionDto {
    pub fn into_domain(self) -> Result<ScheduleException, BookingError> {
        let parse = |s: Option<String>| -> Result<Option<TimeOfDay>, BookingError> {
            s.map(|v| TimeOfDay::parse(&v)).transpose().map_err(Into::into)
        };
        Ok(ScheduleException {
            date: self.date,
            start_time: parse(self.start_time)?,
            end_time: parse(self.end_time)?,
            is_available: self.is_available,
            reason: self.reason,
        })
    }
}

impl From<&ScheduleException> for ScheduleExceptionDto {
    fn from(exception: &ScheduleException) -> Self {
        Self {
            date: exception.date,
            start_time: exception.start_time.map(|t| t.to_string()),
            end_time: exception.end_time.map(|t| t.to_string()),
            is_available: exception.is_available,
            reason: exception.reason.clone(),
        }
    }
}

/// Request to create or fully replace the caller's availability. The whole
/// template and exception list are resent every time.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub weekly_template: Vec<WorkingHoursDto>,
    #[serde(default)]
    pub exceptions: Vec<ScheduleExceptionDto>,
}

/// A counselor's availability record.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub id: String,
    pub counselor_id: String,
    pub weekly_template: Vec<WorkingHoursDto>,
    pub exceptions: Vec<ScheduleExceptionDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Availability> for AvailabilityResponse {
    fn from(availability: &Availability) -> Self {
        Self {
            id: availability.id.to_string(),
            counselor_id: availability.counselor_id.to_string(),
            weekly_template: availability
                .weekly_template
                .entries()
                .iter()
                .map(WorkingHoursDto::from)
                .collect(),
            exceptions: availability
                .exceptions
                .iter()
                .map(ScheduleExceptionDto::from)
                .collect(),
            created_at: availability.created_at.to_string(),
            updated_at: availability.updated_at.to_string(),
        }
    }
}
