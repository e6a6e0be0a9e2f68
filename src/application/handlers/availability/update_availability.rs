//! UpdateAvailabilityHandler - Command handler for replacing a counselor's
//! schedule.

use std::sync::Arc;

use crate::domain::appointment::BookingError;
use crate::domain::availability::{Availability, ScheduleException, WeeklyTemplate, WorkingHours};
use crate::domain::foundation::Identity;
use crate::ports::AvailabilityRepository;

/// Command to create or fully replace the caller's availability.
///
/// The whole template and exception list are resent on every update; there
/// is no per-day patch.
#[derive(Debug, Clone)]
pub struct UpdateAvailabilityCommand {
    pub identity: Identity,
    pub weekly_template: Vec<WorkingHours>,
    pub exceptions: Vec<ScheduleException>,
}

/// Result of a successful availability update.
#[derive(Debug, Clone)]
pub struct UpdateAvailabilityResult {
    pub availability: Availability,
}

/// Handler for availability updates. Counselors only, and only their own
/// record.
pub struct UpdateAvailabilityHandler {
    repository: Arc<dyn AvailabilityRepository>,
}

impl UpdateAvailabilityHandler {
    pub fn new(repository: Arc<dyn AvailabilityRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateAvailabilityCommand,
    ) -> Result<UpdateAvailabilityResult, BookingError> {
        if !cmd.identity.is_counselor() {
            return Err(BookingError::forbidden(
                "Only counselors can manage availability",
            ));
        }

        let template = WeeklyTemplate::new(cmd.weekly_template)?;

        let availability = match self
            .repository
            .find_by_counselor(&cmd.identity.user_id)
            .await?
        {
            Some(mut existing) => {
                existing.replace(template, cmd.exceptions)?;
                existing
            }
            None => Availability::create(
                cmd.identity.user_id.clone(),
                template,
                cmd.exceptions,
            )?,
        };

        self.repository.upsert(&availability).await?;

        Ok(UpdateAvailabilityResult { availability })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        time, weekday_availability, MockAvailabilityRepository,
    };
    use crate::domain::availability::DayOfWeek;
    use crate::domain::foundation::UserId;

    fn entry(day: u8) -> WorkingHours {
        WorkingHours {
            day_of_week: DayOfWeek::new(day).unwrap(),
            start_time: time("10:00"),
            end_time: time("14:00"),
            is_working: true,
        }
    }

    fn counselor() -> Identity {
        Identity::counselor(UserId::new("counselor-1").unwrap())
    }

    #[tokio::test]
    async fn creates_record_on_first_update() {
        let repo = Arc::new(MockAvailabilityRepository::new());
        let handler = UpdateAvailabilityHandler::new(repo.clone());

        let result = handler
            .handle(UpdateAvailabilityCommand {
                identity: counselor(),
                weekly_template: vec![entry(1), entry(2)],
                exceptions: vec![],
            })
            .await
            .unwrap();

        assert_eq!(result.availability.weekly_template.entries().len(), 2);
        assert_eq!(repo.stored().len(), 1);
    }

    #[tokio::test]
    async fn replaces_existing_record_in_full() {
        let existing = weekday_availability("counselor-1");
        let id = existing.id;
        let repo = Arc::new(MockAvailabilityRepository::with_record(existing));
        let handler = UpdateAvailabilityHandler::new(repo.clone());

        let result = handler
            .handle(UpdateAvailabilityCommand {
                identity: counselor(),
                weekly_template: vec![entry(3)],
                exceptions: vec![],
            })
            .await
            .unwrap();

        // Same record, new content: not a second row
        assert_eq!(result.availability.id, id);
        assert_eq!(result.availability.weekly_template.entries().len(), 1);
        assert_eq!(repo.stored().len(), 1);
    }

    #[tokio::test]
    async fn rejects_clients() {
        let repo = Arc::new(MockAvailabilityRepository::new());
        let handler = UpdateAvailabilityHandler::new(repo.clone());

        let result = handler
            .handle(UpdateAvailabilityCommand {
                identity: Identity::client(UserId::new("client-1").unwrap()),
                weekly_template: vec![entry(1)],
                exceptions: vec![],
            })
            .await;

        assert!(matches!(result, Err(BookingError::Forbidden { .. })));
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn rejects_duplicate_template_days() {
        let repo = Arc::new(MockAvailabilityRepository::new());
        let handler = UpdateAvailabilityHandler::new(repo.clone());

        let result = handler
            .handle(UpdateAvailabilityCommand {
                identity: counselor(),
                weekly_template: vec![entry(1), entry(1)],
                exceptions: vec![],
            })
            .await;

        assert!(matches!(result, Err(BookingError::ValidationFailed { .. })));
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn rejects_invalid_exception_window() {
        let repo = Arc::new(MockAvailabilityRepository::new());
        let handler = UpdateAvailabilityHandler::new(repo);

        let result = handler
            .handle(UpdateAvailabilityCommand {
                identity: counselor(),
                weekly_template: vec![entry(1)],
                exceptions: vec![ScheduleException {
                    date: chrono::NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
                    start_time: Some(time("14:00")),
                    end_time: Some(time("10:00")),
                    is_available: true,
                    reason: None,
                }],
            })
            .await;

        assert!(matches!(result, Err(BookingError::ValidationFailed { .. })));
    }
}
