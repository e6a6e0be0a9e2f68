//! CompleteAppointmentHandler - Command handler for closing out a session.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, BookingError};
use crate::domain::foundation::{AppointmentId, Identity};
use crate::ports::AppointmentRepository;

/// Command for the owning counselor to complete a confirmed appointment,
/// optionally attaching session notes in the same call.
#[derive(Debug, Clone)]
pub struct CompleteAppointmentCommand {
    pub identity: Identity,
    pub appointment_id: AppointmentId,
    pub counselor_notes: Option<String>,
}

/// Result of a successful completion.
#[derive(Debug, Clone)]
pub struct CompleteAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for completing appointments.
pub struct CompleteAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl CompleteAppointmentHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(
        &self,
        cmd: CompleteAppointmentCommand,
    ) -> Result<CompleteAppointmentResult, BookingError> {
        let mut appointment = self
            .appointments
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound(cmd.appointment_id))?;

        if !appointment.is_owned_by_counselor(&cmd.identity.user_id) {
            return Err(BookingError::forbidden(
                "Only the appointment's counselor can complete it",
            ));
        }

        appointment.complete(cmd.counselor_notes)?;
        self.appointments.update(&appointment).await?;

        Ok(CompleteAppointmentResult { appointment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{monday, time, MockAppointmentRepository};
    use crate::domain::appointment::{AppointmentStatus, ServiceType, SessionType};
    use crate::domain::foundation::UserId;

    fn confirmed_appointment() -> Appointment {
        let mut appointment = Appointment::book(
            UserId::new("client-1").unwrap(),
            UserId::new("counselor-1").unwrap(),
            ServiceType::Relationship,
            monday(),
            time("15:00"),
            SessionType::Video,
            150_000,
            None,
        );
        appointment.confirm().unwrap();
        appointment
    }

    #[tokio::test]
    async fn completes_with_notes() {
        let appointment = confirmed_appointment();
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let handler = CompleteAppointmentHandler::new(repo.clone());

        let result = handler
            .handle(CompleteAppointmentCommand {
                identity: Identity::counselor(UserId::new("counselor-1").unwrap()),
                appointment_id: id,
                counselor_notes: Some("Discussed coping strategies".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(result.appointment.status, AppointmentStatus::Completed);
        assert_eq!(
            repo.stored()[0].counselor_notes.as_deref(),
            Some("Discussed coping strategies")
        );
    }

    #[tokio::test]
    async fn completes_without_notes() {
        let appointment = confirmed_appointment();
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let handler = CompleteAppointmentHandler::new(repo);

        let result = handler
            .handle(CompleteAppointmentCommand {
                identity: Identity::counselor(UserId::new("counselor-1").unwrap()),
                appointment_id: id,
                counselor_notes: None,
            })
            .await
            .unwrap();

        assert!(result.appointment.counselor_notes.is_none());
    }

    #[tokio::test]
    async fn pending_appointment_cannot_be_completed() {
        let mut appointment = confirmed_appointment();
        appointment.status = AppointmentStatus::Pending;
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let handler = CompleteAppointmentHandler::new(repo);

        let result = handler
            .handle(CompleteAppointmentCommand {
                identity: Identity::counselor(UserId::new("counselor-1").unwrap()),
                appointment_id: id,
                counselor_notes: None,
            })
            .await;

        assert!(matches!(result, Err(BookingError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn client_cannot_complete() {
        let appointment = confirmed_appointment();
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let handler = CompleteAppointmentHandler::new(repo);

        let result = handler
            .handle(CompleteAppointmentCommand {
                identity: Identity::client(UserId::new("client-1").unwrap()),
                appointment_id: id,
                counselor_notes: None,
            })
            .await;

        assert!(matches!(result, Err(BookingError::Forbidden { .. })));
    }
}
