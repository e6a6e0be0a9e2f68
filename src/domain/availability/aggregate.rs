//! Availability aggregate: a counselor's weekly template plus date overrides.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AvailabilityId, Timestamp, UserId, ValidationError};

use super::{ScheduleException, WeeklyTemplate};

/// Per-counselor availability record.
///
/// # Invariants
///
/// - Owned 1:1 by a counselor (unique constraint at the storage layer)
/// - Every update replaces both the template and the exceptions in full;
///   callers resend the entire template even to change one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: AvailabilityId,
    pub counselor_id: UserId,
    pub weekly_template: WeeklyTemplate,
    pub exceptions: Vec<ScheduleException>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Availability {
    /// Creates a counselor's first availability record.
    pub fn create(
        counselor_id: UserId,
        weekly_template: WeeklyTemplate,
        exceptions: Vec<ScheduleException>,
    ) -> Result<Self, ValidationError> {
        for exception in &exceptions {
            exception.validate()?;
        }
        let now = Timestamp::now();
        Ok(Self {
            id: AvailabilityId::new(),
            counselor_id,
            weekly_template,
            exceptions,
            created_at: now,
            updated_at: now,
        })
    }

    /// Full replace of both template and exceptions.
    pub fn replace(
        &mut self,
        weekly_template: WeeklyTemplate,
        exceptions: Vec<ScheduleException>,
    ) -> Result<(), ValidationError> {
        for exception in &exceptions {
            exception.validate()?;
        }
        self.weekly_template = weekly_template;
        self.exceptions = exceptions;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Finds the first exception covering a calendar date, if any.
    ///
    /// The exceptions list is ordered; the first match wins.
    pub fn exception_for(&self, date: NaiveDate) -> Option<&ScheduleException> {
        self.exceptions.iter().find(|e| e.date == date)
    }
}
